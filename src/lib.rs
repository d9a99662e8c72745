//! Running Man - An endless runner on a winding road
//!
//! Core modules:
//! - `sim`: Simulation (road generator, player physics, items, tick order)
//! - `renderer`: Draw pass over an abstract drawing surface
//! - `gameover`: End-of-run panel
//! - `leaderboard`: Online score table bookkeeping
//! - `settings`: Host configuration

pub mod gameover;
pub mod leaderboard;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use gameover::GameOver;
pub use leaderboard::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Frames per second that a time multiplier of 1.0 stands for
    pub const FRAME_RATE: f32 = 60.0;
    /// Clamp for the per-frame time multiplier (avoids tunneling on hitches)
    pub const MAX_TM: f32 = 4.0;

    /// Depth at which scrolled-past objects are retired/recycled
    pub const NEAR: f32 = 0.5;

    /// Road layout
    pub const ROAD_STEP: f32 = 0.5;
    pub const ROAD_WIDTH: f32 = 1.5;
    pub const ROAD_COUNT: usize = 32;
    pub const START_POS: f32 = 8.0;
    pub const DEC_COUNT: usize = 32;
    /// Lateral drift per recycled piece, per unit of curvature
    pub const CURVATURE_FACTOR: f32 = 0.2;

    /// Player depth (the world scrolls past it)
    pub const PLAYER_Z: f32 = 1.0;

    /// Items
    pub const ITEM_COUNT: usize = 16;
    pub const ITEM_CHANCE: f64 = 0.08;
    pub const HAZARD_CHANCE: f64 = 0.3;
    /// Items float above the road (negative y is up)
    pub const ITEM_Y: f32 = -0.2;

    /// World units to metres
    pub const DISTANCE_SCALE: f32 = 10.0;

    /// Virtual canvas size
    pub const CANVAS_W: f32 = 128.0;
    pub const CANVAS_H: f32 = 128.0;
}

/// Move `value` toward `target` by `rate * dt`, never overshooting
///
/// Shared by player speed ramping and the road curvature ramp.
#[inline]
pub fn ramp_toward(value: f32, target: f32, rate: f32, dt: f32) -> f32 {
    if value < target {
        (value + rate * dt).min(target)
    } else if value > target {
        (value - rate * dt).max(target)
    } else {
        value
    }
}

/// Format a distance as metres with one decimal, truncated: `12.34 -> "12.3m"`
pub fn format_distance(dist: f32) -> String {
    let tenths = (dist * 10.0).floor() as i64;
    let sign = if tenths < 0 { "-" } else { "" };
    let tenths = tenths.abs();
    format!("{}{}.{}m", sign, tenths / 10, tenths % 10)
}
