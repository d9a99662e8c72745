//! World draw pass
//!
//! Order: road floor, items, player, then decorations on top.

use glam::Vec3;

use super::{Bitmap, Color, Surface, TextAlign};
use crate::format_distance;
use crate::sim::item::Item;
use crate::sim::player::Player;
use crate::sim::road::{Decoration, Road};
use crate::sim::state::{GamePhase, GameState};
use crate::sim::Flip;

// Floor gradient (screen rows and colours)
const FLOOR_TOP: f32 = 72.0;
const FLOOR_BOTTOM: f32 = 104.0;
const FLOOR_FAR: Color = Color(85, 48, 0);
const FLOOR_NEAR: Color = Color(192, 144, 64);

const PLAYER_SHADOW_DIVISOR: f32 = 0.175;
const PLAYER_SHADOW_FRAMES: f32 = 3.0;

const ITEM_SHADOW_W: f32 = 0.5;
const ITEM_SHADOW_H: f32 = 0.30;
const ITEM_AMPLITUDE: f32 = 0.025;
const ITEM_DEATH_SCALE: f32 = 1.25;

const DEC_CELL: f32 = 32.0;
const DEC_SIZE: f32 = 0.8;

/// Draw the whole game: world, HUD, and the game-over panel when active
pub fn draw_game(g: &mut impl Surface, state: &GameState) {
    g.set_camera_x(state.camera_x);

    draw_road(g, &state.road);
    for item in state.items.iter() {
        draw_item(g, item);
    }
    draw_player(g, &state.player);
    for dec in state.road.decorations.iter() {
        draw_decoration(g, dec);
    }

    g.draw_text(Bitmap::Font, &format_distance(state.distance), 64.0, 2.0, TextAlign::Center);

    if state.phase == GamePhase::GameOver {
        super::draw_game_over(g, &state.game_over);
    }
}

pub fn draw_road(g: &mut impl Surface, road: &Road) {
    g.set_floor_gradient(FLOOR_TOP, FLOOR_BOTTOM, FLOOR_FAR, FLOOR_NEAR);

    for piece in road.pieces.iter().filter(|p| p.exist) {
        g.draw_floor_rect(
            piece.start_x - piece.width / 2.0,
            piece.end_x - piece.width / 2.0,
            0.0,
            piece.z,
            piece.width,
            piece.depth,
        );
    }
}

pub fn draw_decoration(g: &mut impl Surface, dec: &Decoration) {
    if !dec.exist {
        return;
    }
    let src = (0.0, dec.id as f32 * DEC_CELL, DEC_CELL, DEC_CELL);
    g.draw_sprite_3d(Bitmap::Decorations, src, dec.pos, DEC_SIZE, DEC_SIZE, Flip::None);
}

pub fn draw_item(g: &mut impl Surface, item: &Item) {
    let mut scale = 1.0;
    if !item.exist {
        if !item.dying {
            return;
        }
        // Swell and fade out
        let t = (item.death_timer / item.max_death_time).clamp(0.0, 1.0);
        scale += (1.0 - t) * ITEM_DEATH_SCALE;
        g.set_global_alpha(t);
    }

    g.draw_flat_3d(
        Bitmap::Shadow,
        (0.0, 0.0, 24.0, 24.0),
        Vec3::new(item.pos.x, 0.0, item.pos.z),
        ITEM_SHADOW_W,
        ITEM_SHADOW_H,
        Flip::None,
    );

    let pos = Vec3::new(
        item.pos.x,
        item.pos.y + item.wave.sin() * ITEM_AMPLITUDE,
        // Swelling sprite stays anchored on the ground
        item.pos.z - item.h * (scale - 1.0),
    );
    g.draw_sprite_3d(
        Bitmap::Items,
        item.sprite.source_rect(),
        pos,
        item.w * scale,
        item.h * scale,
        Flip::None,
    );

    if item.dying {
        g.set_global_alpha(1.0);
    }
}

pub fn draw_player(g: &mut impl Surface, pl: &Player) {
    let Some(p) = g.project(pl.pos.x, pl.pos.y, pl.pos.z) else {
        return;
    };

    // Shadow shrinks with height
    let shadow_y = g
        .project(pl.pos.x, 0.0, pl.pos.z)
        .map(|s| s.y)
        .unwrap_or(p.y);
    let frame = (pl.pos.y.abs() / PLAYER_SHADOW_DIVISOR).floor().min(PLAYER_SHADOW_FRAMES);
    g.draw_bitmap_region(
        Bitmap::Shadow,
        (24.0 * frame, 0.0, 24.0, 24.0),
        p.x - 12.0,
        shadow_y - 20.0,
        Flip::None,
    );

    let y_plus = if pl.rolling { 2.0 } else { 0.0 };
    g.draw_bitmap_region(
        Bitmap::Player,
        pl.sprite.source_rect(),
        p.x - 12.0,
        p.y - 20.0 + y_plus,
        pl.flip,
    );
}
