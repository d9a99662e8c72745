//! End-of-run panel
//!
//! Shows the distance reached and waits for confirm. The host plays its
//! transition and then resets the game state.

use serde::{Deserialize, Serialize};

use crate::format_distance;
use crate::sim::input::{ButtonState, InputSnapshot};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameOver {
    pub active: bool,
    /// Distance reached, in metres
    pub dist: f32,
    pub dist_str: String,
}

impl GameOver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, distance: f32) {
        self.active = true;
        self.dist = distance;
        self.dist_str = format_distance(distance);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Returns true when the player asks to restart
    pub fn update(&mut self, input: &InputSnapshot) -> bool {
        self.active && input.buttons.confirm == ButtonState::Pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Buttons;

    fn confirm() -> InputSnapshot {
        InputSnapshot {
            buttons: Buttons {
                confirm: ButtonState::Pressed,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_activate_formats_distance() {
        let mut go = GameOver::new();
        go.activate(123.456);
        assert!(go.active);
        assert_eq!(go.dist_str, "123.4m");
    }

    #[test]
    fn test_restart_needs_confirm_press() {
        let mut go = GameOver::new();
        assert!(!go.update(&confirm()));

        go.activate(1.0);
        assert!(!go.update(&InputSnapshot::default()));
        let held = InputSnapshot {
            buttons: Buttons {
                confirm: ButtonState::Down,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!go.update(&held));
        assert!(go.update(&confirm()));
    }
}
