//! Surface that records draw calls for assertions

use glam::{Vec2, Vec3};

use super::{Bitmap, Color, Region, Surface, TextAlign};
use crate::sim::Flip;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Color(Color),
    Alpha(f32),
    Clear(Color),
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Bitmap { bitmap: Bitmap, dx: f32, dy: f32 },
    Flat3d { bitmap: Bitmap },
    Sprite3d { bitmap: Bitmap, w: f32, z: f32 },
    FloorGradient,
    FloorRect { x1: f32, x2: f32, z: f32 },
    Text { font: Bitmap, text: String, x: f32, y: f32 },
}

pub struct Recorder {
    pub calls: Vec<Call>,
    pub camera_x: f32,
    /// When false, `project` culls everything
    pub visible: bool,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            camera_x: 0.0,
            visible: true,
        }
    }
}

impl Recorder {
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn project(&self, x: f32, y: f32, z: f32) -> Option<Vec2> {
        if !self.visible || z <= 0.0 {
            return None;
        }
        Some(Vec2::new(64.0 + (x - self.camera_x) * 64.0 / z, 72.0 + y * 64.0 / z))
    }

    fn set_camera_x(&mut self, x: f32) {
        self.camera_x = x;
    }

    fn set_global_color(&mut self, color: Color) {
        self.calls.push(Call::Color(color));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.calls.push(Call::Alpha(alpha));
    }

    fn clear_screen(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(Call::Rect { x, y, w, h });
    }

    fn draw_bitmap_region(&mut self, bitmap: Bitmap, _src: Region, dx: f32, dy: f32, _flip: Flip) {
        self.calls.push(Call::Bitmap { bitmap, dx, dy });
    }

    fn draw_flat_3d(&mut self, bitmap: Bitmap, _src: Region, _pos: Vec3, _w: f32, _h: f32, _flip: Flip) {
        self.calls.push(Call::Flat3d { bitmap });
    }

    fn draw_sprite_3d(&mut self, bitmap: Bitmap, _src: Region, pos: Vec3, w: f32, _h: f32, _flip: Flip) {
        self.calls.push(Call::Sprite3d { bitmap, w, z: pos.z });
    }

    fn set_floor_gradient(&mut self, _y_start: f32, _y_end: f32, _top: Color, _bottom: Color) {
        self.calls.push(Call::FloorGradient);
    }

    fn draw_floor_rect(&mut self, x1: f32, x2: f32, _y: f32, z: f32, _w: f32, _depth: f32) {
        self.calls.push(Call::FloorRect { x1, x2, z });
    }

    fn draw_text(&mut self, font: Bitmap, text: &str, x: f32, y: f32, _align: TextAlign) {
        self.calls.push(Call::Text {
            font,
            text: text.to_string(),
            x,
            y,
        });
    }
}
