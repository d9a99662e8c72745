//! Sprite sheet animation state
//!
//! A sprite sheet is a grid of fixed-size frames; each row holds one
//! animation. The simulation only tracks which cell to show.

use serde::{Deserialize, Serialize};

/// Sprite mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    /// Cell size in pixels
    pub width: u32,
    pub height: u32,
    pub frame: u32,
    pub row: u32,
    /// Time accumulated on the current frame
    count: f32,
}

impl Sprite {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: 0,
            row: 0,
            count: 0.0,
        }
    }

    /// Play frames `start..=end` of `row`, advancing one frame every `speed` ticks
    ///
    /// `start == end` shows a single still frame.
    pub fn animate(&mut self, row: u32, start: u32, end: u32, speed: f32, tm: f32) {
        if start >= end {
            self.count = 0.0;
            self.frame = start;
            self.row = row;
            return;
        }

        if self.row != row {
            self.count = 0.0;
            self.frame = start;
            self.row = row;
        }
        if self.frame < start || self.frame > end {
            self.frame = start;
        }

        if speed <= 0.0 {
            self.count = 0.0;
            self.frame = if self.frame >= end { start } else { self.frame + 1 };
            return;
        }

        self.count += tm;
        if self.count > speed {
            self.frame = if self.frame >= end { start } else { self.frame + 1 };
            self.count -= speed;
        }
    }

    /// Source rectangle of the current cell: (x, y, w, h)
    pub fn source_rect(&self) -> (f32, f32, f32, f32) {
        (
            (self.frame * self.width) as f32,
            (self.row * self.height) as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}
