//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time multiplier `tm` passed explicitly to every update
//! - Seeded RNG only, passed by reference
//! - Fixed per-tick order (input, player, road, items, camera)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod geometry;
pub mod input;
pub mod item;
pub mod player;
pub mod pool;
pub mod road;
pub mod sprite;
pub mod state;
pub mod tick;

pub use geometry::is_inside_triangle;
pub use input::{ButtonState, Buttons, InputSnapshot};
pub use item::{Item, ItemKind};
pub use player::{Player, SpeedLimit};
pub use pool::{Exhausted, Pool, Poolable};
pub use road::{Decoration, Road, RoadPiece, SpawnSite};
pub use sprite::{Flip, Sprite};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
