//! Rendering module
//!
//! The core owns no pixels. It issues draw calls against a `Surface` the
//! host implements (canvas, software rasterizer, test recorder, ...).

pub mod scene;
pub mod screens;
#[cfg(test)]
pub(crate) mod test_surface;

pub use scene::draw_game;
pub use screens::{draw_game_over, draw_leaderboard};

use glam::{Vec2, Vec3};

use crate::sim::Flip;

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
    pub const GRAY: Color = Color(85, 85, 85);
}

/// Source rectangle in a bitmap: (x, y, w, h) in pixels
pub type Region = (f32, f32, f32, f32);

/// Bitmaps the draw pass refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitmap {
    Player,
    Shadow,
    Items,
    Decorations,
    Font,
    FontYellow,
    TinyText,
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing primitives provided by the host
pub trait Surface {
    /// Screen position of a world point, None if behind the camera or off the frustum
    fn project(&self, x: f32, y: f32, z: f32) -> Option<Vec2>;
    /// Lateral camera position used by `project`
    fn set_camera_x(&mut self, x: f32);

    fn set_global_color(&mut self, color: Color);
    fn set_global_alpha(&mut self, alpha: f32);
    fn clear_screen(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn draw_bitmap_region(&mut self, bitmap: Bitmap, src: Region, dx: f32, dy: f32, flip: Flip);
    /// Ground-aligned quad centred at `pos` (shadows)
    fn draw_flat_3d(&mut self, bitmap: Bitmap, src: Region, pos: Vec3, w: f32, h: f32, flip: Flip);
    /// Camera-facing quad standing on `pos`
    fn draw_sprite_3d(&mut self, bitmap: Bitmap, src: Region, pos: Vec3, w: f32, h: f32, flip: Flip);

    /// Vertical colour ramp used by subsequent floor rects, over screen rows `y_start..y_end`
    fn set_floor_gradient(&mut self, y_start: f32, y_end: f32, top: Color, bottom: Color);
    /// Floor trapezoid at height `y` from depth `z` to `z + depth`, left edge `x1` (near) to `x2` (far)
    fn draw_floor_rect(&mut self, x1: f32, x2: f32, y: f32, z: f32, w: f32, depth: f32);

    fn draw_text(&mut self, font: Bitmap, text: &str, x: f32, y: f32, align: TextAlign);
}
