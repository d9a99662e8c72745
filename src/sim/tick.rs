//! Simulation tick
//!
//! Advances a run by one frame. The order is fixed: input, player physics,
//! road (player contact before recycling), items, camera.

use rand::Rng;
use rand_pcg::Pcg32;

use super::input::InputSnapshot;
use super::item::{Item, ItemKind};
use super::pool::Pool;
use super::road::Road;
use super::state::{GameEvent, GamePhase, GameState, spawn_item};
use crate::consts::*;

/// Advance the game state by one frame; `tm` is in 60 Hz frames
pub fn tick(state: &mut GameState, input: &InputSnapshot, tm: f32) {
    let tm = tm.clamp(0.0, MAX_TM);

    if state.phase == GamePhase::GameOver {
        if state.game_over.update(input) {
            state.reset();
        }
        return;
    }

    state.time_ticks += 1;

    // Player physics
    let pl = &mut state.player;
    pl.control(input, tm);
    pl.move_step(tm);
    pl.animate(tm);
    pl.clear_road_contact();

    // World scrolls at the player's forward speed
    let global_speed = state.player.speed.z;
    state.road.update(global_speed, &mut state.player, &mut state.rng, tm);
    spawn_road_items(&state.road, &mut state.items, &mut state.rng);

    for item in state.items.iter_mut() {
        if let Some(kind) = item.update(&mut state.player, NEAR, tm) {
            log::debug!("Collected {:?} at {:.1}m", kind, state.distance);
            state.events.push(GameEvent::ItemCollected { kind });
        }
    }

    state.camera_x = state.player.update_camera(state.camera_x, tm);
    state.distance += state.player.speed.z * tm * DISTANCE_SCALE;

    if state.player.knocked_out {
        log::info!("Run {} ended at {:.1}m", state.run, state.distance);
        state.events.push(GameEvent::RunEnded {
            distance: state.distance,
        });
        state.game_over.activate(state.distance);
        state.phase = GamePhase::GameOver;
    }
}

/// Maybe drop an item in the middle of each road piece created this tick
fn spawn_road_items(road: &Road, items: &mut Pool<Item>, rng: &mut Pcg32) {
    for site in road.spawn_sites() {
        if !rng.random_bool(ITEM_CHANCE) {
            continue;
        }
        let kind = if rng.random_bool(HAZARD_CHANCE) {
            ItemKind::Rock
        } else {
            ItemKind::Gem
        };
        let (x, z) = site.center();
        if spawn_item(items, x, ITEM_Y, z, kind).is_some() {
            log::debug!("Spawned {:?} at x={:.2} z={:.2}", kind, x, z);
        }
    }
}
