//! Host settings
//!
//! Loaded from a JSON file by the native runner. Missing fields fall back
//! to their defaults, so a settings file only needs the keys it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::pool::Exhausted;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name submitted to the leaderboard
    pub player_name: String,
    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,
    /// Host frame rate; the simulation runs in 60 Hz frame units
    pub frame_rate: f32,
    /// Stop a headless session after this many seconds
    pub max_seconds: f32,
    /// Let the autopilot play
    pub autopilot: bool,
    /// What object pools do when they run out of slots
    pub pool_exhausted: Exhausted,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "PLAYER".to_string(),
            seed: None,
            frame_rate: 60.0,
            max_seconds: 120.0,
            autopilot: true,
            pool_exhausted: Exhausted::ReuseFirst,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Simulation time multiplier for one host frame
    pub fn tm(&self) -> f32 {
        if self.frame_rate > 0.0 {
            crate::consts::FRAME_RATE / self.frame_rate
        } else {
            1.0
        }
    }

    /// Host frames in a headless session
    pub fn max_frames(&self) -> u64 {
        (self.max_seconds.max(0.0) * self.frame_rate.max(0.0)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "player_name": "ZED", "seed": 7 }"#).unwrap();
        assert_eq!(s.player_name, "ZED");
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.frame_rate, 60.0);
        assert_eq!(s.pool_exhausted, Exhausted::ReuseFirst);
    }

    #[test]
    fn test_pool_policy_from_json() {
        let s = Settings::from_json(r#"{ "pool_exhausted": "Drop" }"#).unwrap();
        assert_eq!(s.pool_exhausted, Exhausted::Drop);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Settings::load("/definitely/not/here.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_time_multiplier() {
        let mut s = Settings::default();
        assert_eq!(s.tm(), 1.0);
        s.frame_rate = 30.0;
        assert_eq!(s.tm(), 2.0);
        s.max_seconds = 2.0;
        assert_eq!(s.max_frames(), 60);
    }

    #[test]
    fn test_json_roundtrip_keeps_name() {
        let s = Settings {
            player_name: "ANN".to_string(),
            ..Default::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back.player_name, "ANN");
    }
}
