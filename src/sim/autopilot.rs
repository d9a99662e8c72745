//! Demo driver
//!
//! Produces input snapshots from the current state so the game can play
//! itself (attract mode, headless runs, soak tests).

use glam::Vec2;

use super::input::InputSnapshot;
use super::item::ItemKind;
use super::state::{GamePhase, GameState};

/// How far ahead (depth) a rock triggers a jump
const LOOKAHEAD: f32 = 0.6;
/// Stick deflection per unit of lateral error
const STEER_GAIN: f32 = 8.0;
/// Lateral error ignored when steering
const STEER_DEADBAND: f32 = 0.02;

/// Input for the next tick
///
/// `prev` is the snapshot returned last tick, so button transitions stay
/// well formed (a press always follows a release).
pub fn drive(state: &GameState, prev: &InputSnapshot) -> InputSnapshot {
    if state.phase == GamePhase::GameOver {
        let held = !prev.buttons.confirm.is_down();
        return prev.advance(Vec2::ZERO, held, false, false);
    }

    let pl = &state.player;

    // Aim a little ahead so curves are taken early
    let aim_z = pl.pos.z + pl.speed.z * 10.0;
    let center = state
        .road
        .center_at(aim_z)
        .or_else(|| state.road.center_at(pl.pos.z))
        .unwrap_or(pl.pos.x);
    let error = center - pl.pos.x;
    let steer = if error.abs() < STEER_DEADBAND {
        0.0
    } else {
        (error * STEER_GAIN).clamp(-1.0, 1.0)
    };

    let rock_ahead = state.items.active().any(|item| {
        item.exist
            && item.kind() == Some(ItemKind::Rock)
            && (item.pos.x - pl.pos.x).abs() < item.w
            && item.pos.z > pl.pos.z
            && item.pos.z - pl.pos.z < LOOKAHEAD + pl.speed.z * 10.0
    });
    let jump = rock_ahead && pl.can_jump && !prev.buttons.fire1.is_down();

    // Keep holding jump while airborne for full height
    let hold_jump = jump || (prev.buttons.fire1.is_down() && !pl.can_jump);

    prev.advance(Vec2::new(steer, -1.0), false, hold_jump, false)
}
