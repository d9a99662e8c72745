//! Online leaderboard bookkeeping
//!
//! The HTTP transport and the checksum secret belong to the host. This
//! module builds the request queries, parses the `|`-separated response
//! bodies and keeps the top-10 table the leaderboard screen shows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::input::{ButtonState, InputSnapshot};

/// Number of entries the server returns
pub const SCORE_MAX: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("server rejected request: {0}")]
    Rejected(String),
    #[error("empty response")]
    EmptyResponse,
    #[error("score {raw:?} for {name:?} is not an integer")]
    MalformedScore { name: String, raw: String },
    #[error("expected name/score pairs, got {0} fields")]
    OddFieldCount(usize),
}

/// Shared-secret checksum over a submitted score
///
/// The algorithm is the server's contract; the host supplies it.
pub trait ScoreSigner {
    fn sign(&self, score: u32) -> String;
}

impl<F: Fn(u32) -> String> ScoreSigner for F {
    fn sign(&self, score: u32) -> String {
        self(score)
    }
}

/// A single leaderboard row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// Distance in metres
    pub value: f32,
}

/// A request the host should send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Fetch,
    Submit {
        name: String,
        /// Distance in tenths of a metre
        score: u32,
        check: String,
    },
}

impl Request {
    /// Submit a distance (metres), truncated to tenths
    pub fn submit(name: &str, distance: f32, signer: &impl ScoreSigner) -> Self {
        let score = (distance * 10.0).max(0.0) as u32;
        Request::Submit {
            name: name.to_string(),
            score,
            check: signer.sign(score),
        }
    }

    /// Query string for the request URL
    pub fn query(&self) -> String {
        match self {
            Request::Fetch => "mode=get".to_string(),
            Request::Submit { name, score, check } => format!(
                "mode=set&name={}&score={}&check={}",
                urlencoding::encode(name),
                score,
                check
            ),
        }
    }
}

/// Split a response body into its payload fields
///
/// The first field is `true` on success; otherwise the rest is the error
/// message.
pub fn parse_response(body: &str) -> Result<Vec<String>, LeaderboardError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(LeaderboardError::EmptyResponse);
    }

    let mut fields = body.split('|');
    let success = fields.next() == Some("true");
    let rest: Vec<String> = fields.map(str::to_string).collect();

    if success {
        Ok(rest)
    } else {
        Err(LeaderboardError::Rejected(rest.join("|")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    pub scores: Vec<ScoreEntry>,
    /// A request is in flight
    pub fetching: bool,
    /// Row of the score just submitted, highlighted on screen
    pub added_index: Option<usize>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            scores: vec![ScoreEntry::default(); SCORE_MAX],
            fetching: false,
            added_index: None,
        }
    }

    /// Mark a request as started and return it for the host to send
    pub fn begin(&mut self, request: Request) -> Request {
        self.fetching = true;
        log::info!("Leaderboard request: {}", request.query());
        request
    }

    /// Replace the table with `name, score, name, score, ...` fields
    ///
    /// Scores arrive in tenths of a metre. Nothing changes on error.
    pub fn set_scores(&mut self, data: &[String]) -> Result<(), LeaderboardError> {
        if data.len() % 2 != 0 {
            return Err(LeaderboardError::OddFieldCount(data.len()));
        }

        let mut parsed = Vec::with_capacity(data.len() / 2);
        for pair in data.chunks(2).take(SCORE_MAX) {
            let (name, raw) = (&pair[0], &pair[1]);
            let value: i64 = raw
                .trim()
                .parse()
                .map_err(|_| LeaderboardError::MalformedScore {
                    name: name.clone(),
                    raw: raw.clone(),
                })?;
            parsed.push(ScoreEntry {
                name: name.clone(),
                value: value as f32 / 10.0,
            });
        }

        for (slot, entry) in self.scores.iter_mut().zip(parsed) {
            *slot = entry;
        }
        Ok(())
    }

    /// Apply a response body for `request`
    ///
    /// On failure the error is logged and the table keeps its old contents.
    pub fn apply_response(&mut self, request: &Request, body: &str) -> Result<(), LeaderboardError> {
        self.fetching = false;

        let result = parse_response(body).and_then(|data| self.set_scores(&data));
        if let Err(e) = &result {
            log::error!("Leaderboard error: {}", e);
            return result;
        }

        if let Request::Submit { name, score, .. } = request {
            let score = *score as f32;
            if let Some(i) = self
                .scores
                .iter()
                .rposition(|e| &e.name == name && (e.value * 10.0 - score).abs() < 0.1)
            {
                self.added_index = Some(i);
            }
        }

        log::info!("Leaderboard updated");
        Ok(())
    }

    /// Transport failure (no body at all)
    pub fn request_failed(&mut self, message: &str) {
        self.fetching = false;
        log::error!("Leaderboard request failed: {}", message);
    }

    /// Entering the leaderboard screen
    pub fn on_enter(&mut self) {
        self.added_index = None;
    }

    /// Returns true when the player leaves the screen
    pub fn update(&mut self, input: &InputSnapshot) -> bool {
        input.buttons.confirm == ButtonState::Pressed
    }
}
