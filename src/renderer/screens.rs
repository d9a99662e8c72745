//! Full-screen and overlay panels

use super::{Bitmap, Color, Surface, TextAlign};
use crate::consts::{CANVAS_H, CANVAS_W};
use crate::format_distance;
use crate::gameover::GameOver;
use crate::leaderboard::Leaderboard;
use crate::sim::Flip;

const PANEL_W: f32 = 96.0;
const PANEL_H: f32 = 64.0;

const ROW_TOP: f32 = 16.0;
const ROW_SPACING: f32 = 9.0;

/// Gray box with a black then white border drawn outside it
fn draw_box(g: &mut impl Surface, x: f32, y: f32, w: f32, h: f32) {
    g.set_global_color(Color::WHITE);
    g.fill_rect(x - 2.0, y - 2.0, w + 4.0, h + 4.0);
    g.set_global_color(Color::BLACK);
    g.fill_rect(x - 1.0, y - 1.0, w + 2.0, h + 2.0);
    g.set_global_color(Color::GRAY);
    g.fill_rect(x, y, w, h);
}

/// End-of-run panel, drawn over the game
pub fn draw_game_over(g: &mut impl Surface, go: &GameOver) {
    if !go.active {
        return;
    }

    let cx = CANVAS_W / 2.0;
    let cy = CANVAS_H / 2.0;
    draw_box(g, cx - PANEL_W / 2.0, cy - PANEL_H / 2.0, PANEL_W, PANEL_H);

    g.draw_text(Bitmap::Font, "GAME OVER!", cx, 34.0, TextAlign::Center);
    // "DISTANCE" label
    g.draw_bitmap_region(Bitmap::TinyText, (0.0, 0.0, 32.0, 8.0), cx - 16.0, 46.0, Flip::None);
    g.draw_text(Bitmap::Font, &go.dist_str, cx, 54.0, TextAlign::Center);
}

pub fn draw_leaderboard(g: &mut impl Surface, lb: &Leaderboard) {
    g.clear_screen(Color::WHITE);
    g.set_global_color(Color::BLACK);
    g.fill_rect(1.0, 1.0, CANVAS_W - 2.0, CANVAS_H - 2.0);
    g.set_global_color(Color::GRAY);
    g.fill_rect(2.0, 2.0, CANVAS_W - 4.0, CANVAS_H - 4.0);

    let cx = CANVAS_W / 2.0;
    g.draw_text(Bitmap::Font, "LEADERBOARD", cx, 4.0, TextAlign::Center);

    if lb.fetching {
        g.draw_text(Bitmap::Font, "FETCHING...", cx, 60.0, TextAlign::Center);
    } else {
        for (i, entry) in lb.scores.iter().enumerate() {
            let font = if lb.added_index == Some(i) {
                Bitmap::FontYellow
            } else {
                Bitmap::Font
            };
            let y = ROW_TOP + i as f32 * ROW_SPACING;
            g.draw_text(font, &entry.name, 4.0, y, TextAlign::Left);
            g.draw_text(font, &format_distance(entry.value), cx, y, TextAlign::Left);
        }
    }

    g.draw_text(Bitmap::Font, "PRESS ENTER", cx, 114.0, TextAlign::Center);
}
