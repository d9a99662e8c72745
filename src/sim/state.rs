//! Game state and core simulation types
//!
//! Everything a run needs lives here, so a snapshot of `GameState` is enough
//! to replay it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemKind};
use super::player::Player;
use super::pool::{Exhausted, Pool};
use super::road::Road;
use crate::consts::*;
use crate::gameover::GameOver;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended, game-over panel shown
    GameOver,
}

/// Things that happened during a tick, for audio and HUD hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemCollected { kind: ItemKind },
    RunEnded { distance: f32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Base seed for reproducibility
    pub seed: u64,
    /// Runs started since creation (restarts)
    pub run: u32,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub road: Road,
    pub items: Pool<Item>,
    /// Camera lateral position
    pub camera_x: f32,
    /// Metres covered this run
    pub distance: f32,
    pub time_ticks: u64,
    pub game_over: GameOver,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    policy: Exhausted,
}

/// Seed for the `run`-th run from a base seed
fn run_seed(seed: u64, run: u32) -> u64 {
    seed.wrapping_add((run as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_policy(seed, Exhausted::default())
    }

    /// Create a game state whose pools use `policy` when full
    pub fn with_policy(seed: u64, policy: Exhausted) -> Self {
        Self {
            seed,
            run: 0,
            rng: Pcg32::seed_from_u64(run_seed(seed, 0)),
            phase: GamePhase::Playing,
            player: Player::new(PLAYER_Z),
            road: Road::new().with_policy(policy),
            items: Pool::new(ITEM_COUNT, |_| Item::new()).with_policy(policy),
            camera_x: 0.0,
            distance: 0.0,
            time_ticks: 0,
            game_over: GameOver::new(),
            events: Vec::new(),
            policy,
        }
    }

    /// Start the next run: fresh world, next seed in the sequence
    pub fn reset(&mut self) {
        let run = self.run + 1;
        let events = std::mem::take(&mut self.events);
        *self = Self::with_policy(self.seed, self.policy);
        self.run = run;
        self.rng = Pcg32::seed_from_u64(run_seed(self.seed, run));
        self.events = events;
        log::info!("Run {} started (seed {})", run, self.seed);
    }

    /// Place an item; returns its slot, or None if the pool refused
    pub fn spawn_item(&mut self, x: f32, y: f32, z: f32, kind: ItemKind) -> Option<usize> {
        spawn_item(&mut self.items, x, y, z, kind)
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

pub(super) fn spawn_item(items: &mut Pool<Item>, x: f32, y: f32, z: f32, kind: ItemKind) -> Option<usize> {
    let i = items.claim()?;
    let item = items.get_mut(i)?;
    item.create_self(x, y, z, kind.id());
    Some(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::Poolable;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.items.active_count(), 0);
        assert_eq!(state.player.pos.z, PLAYER_Z);
        assert_eq!(state.road.pieces.active_count(), 16);
    }

    #[test]
    fn test_spawn_item() {
        let mut state = GameState::new(42);
        let i = state.spawn_item(0.5, ITEM_Y, 4.0, ItemKind::Rock).unwrap();
        let item = state.items.get(i).unwrap();
        assert!(item.exists());
        assert_eq!(item.kind(), Some(ItemKind::Rock));
    }

    #[test]
    fn test_drop_policy_refuses_full_pool() {
        let mut state = GameState::with_policy(1, Exhausted::Drop);
        for _ in 0..ITEM_COUNT {
            assert!(state.spawn_item(0.0, ITEM_Y, 4.0, ItemKind::Gem).is_some());
        }
        assert_eq!(state.spawn_item(0.0, ITEM_Y, 4.0, ItemKind::Gem), None);
    }

    #[test]
    fn test_reset_advances_run() {
        let mut state = GameState::new(42);
        state.distance = 50.0;
        state.phase = GamePhase::GameOver;
        state.reset();
        assert_eq!(state.run, 1);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.seed, 42);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(7);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 7);
        assert_eq!(back.road.pieces.active_count(), 16);
    }
}
