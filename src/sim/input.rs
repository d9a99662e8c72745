//! Per-tick input snapshot
//!
//! The host samples its devices once per frame and hands the simulation a
//! read-only snapshot. Button transitions (Pressed/Released) last exactly one
//! tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// State of a digital button for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonState {
    #[default]
    Up,
    /// Went down this tick
    Pressed,
    /// Held since an earlier tick
    Down,
    /// Went up this tick
    Released,
}

impl ButtonState {
    /// Next state given whether the physical button is held now
    pub fn advance(self, held: bool) -> Self {
        match (self.is_down(), held) {
            (false, true) => ButtonState::Pressed,
            (true, true) => ButtonState::Down,
            (true, false) => ButtonState::Released,
            (false, false) => ButtonState::Up,
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::Down)
    }
}

/// Named buttons of the virtual pad
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Buttons {
    pub confirm: ButtonState,
    /// Jump
    pub fire1: ButtonState,
    /// Roll
    pub fire2: ButtonState,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Analog stick, each axis in [-1, 1]; negative y is forward
    pub stick: Vec2,
    pub buttons: Buttons,
}

impl InputSnapshot {
    /// Build the next snapshot from raw held flags, keeping transitions right
    pub fn advance(&self, stick: Vec2, confirm: bool, fire1: bool, fire2: bool) -> Self {
        Self {
            stick: stick.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)),
            buttons: Buttons {
                confirm: self.buttons.confirm.advance(confirm),
                fire1: self.buttons.fire1.advance(fire1),
                fire2: self.buttons.fire2.advance(fire2),
            },
        }
    }
}
