//! Collectibles and hazards placed on the road
//!
//! Items live in a pool. Touching one retires it immediately and starts a
//! short death animation that keeps scrolling with the world.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::pool::Poolable;
use super::sprite::Sprite;

const DEFAULT_SIZE: f32 = 0.4;
pub const DEATH_MAX: f32 = 20.0;

/// Depth half-band for player contact, before speed widening
const COLLISION_DEPTH: f32 = 0.2;
const ANIM_SPEED: f32 = 6.0;
const WAVE_SPEED: f32 = 0.1;

/// Known item variants, by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Speed boost
    Gem,
    /// Knocks the player out
    Rock,
}

impl ItemKind {
    pub fn id(self) -> u32 {
        match self {
            ItemKind::Gem => 0,
            ItemKind::Rock => 1,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(ItemKind::Gem),
            1 => Some(ItemKind::Rock),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub exist: bool,
    pub pos: Vec3,
    pub w: f32,
    pub h: f32,
    /// Bobbing phase
    pub wave: f32,
    pub dying: bool,
    pub death_timer: f32,
    pub max_death_time: f32,
    pub sprite: Sprite,
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl Poolable for Item {
    fn exists(&self) -> bool {
        // A dying item still owns its slot until the animation ends
        self.exist || self.dying
    }
}

impl Item {
    pub fn new() -> Self {
        Self {
            id: 0,
            exist: false,
            pos: Vec3::ZERO,
            w: DEFAULT_SIZE,
            h: DEFAULT_SIZE,
            wave: 0.0,
            dying: false,
            death_timer: 0.0,
            max_death_time: DEATH_MAX,
            sprite: Sprite::new(24, 24),
        }
    }

    pub fn create_self(&mut self, x: f32, y: f32, z: f32, id: u32) {
        self.pos = Vec3::new(x, y, z);
        self.id = id;
        self.sprite.row = id;
        self.exist = true;
        self.dying = false;
    }

    pub fn kind(&self) -> Option<ItemKind> {
        ItemKind::from_id(self.id)
    }

    /// Test contact with the player and apply the item's effect on a hit
    ///
    /// The depth band is widened by the player's forward speed so fast
    /// runners cannot skip over an item between two ticks.
    pub fn player_collision(&mut self, pl: &mut Player) -> bool {
        if !self.exist {
            return false;
        }

        let reach = COLLISION_DEPTH + pl.speed.z.abs();
        let p = pl.pos;
        let hit = p.x > self.pos.x - self.w / 2.0
            && p.x < self.pos.x + self.w / 2.0
            && p.y > self.pos.y - self.h / 2.0
            && p.z > self.pos.z - reach
            && p.z < self.pos.z + reach;
        if !hit {
            return false;
        }

        self.exist = false;
        self.dying = true;
        self.death_timer = self.max_death_time;

        match self.kind() {
            Some(ItemKind::Gem) => pl.boost(),
            Some(ItemKind::Rock) => pl.knock_out(),
            None => {}
        }
        true
    }

    /// Scroll with the world, animate, and check for contact
    ///
    /// Returns the kind of item collected this tick, if any.
    pub fn update(&mut self, pl: &mut Player, near: f32, tm: f32) -> Option<ItemKind> {
        if !self.exist {
            if self.dying {
                self.death_timer -= tm;
                if self.death_timer <= 0.0 {
                    self.dying = false;
                }

                self.pos.z -= pl.speed.z * tm;

                self.sprite
                    .animate(self.id * 2 + 1, 0, 4, self.max_death_time / 5.0, tm);
            }
            return None;
        }

        self.pos.z -= pl.speed.z * tm;
        if self.pos.z < near {
            self.exist = false;
        }

        self.sprite.animate(self.id * 2, 0, 4, ANIM_SPEED, tm);
        self.wave += WAVE_SPEED * tm;

        if self.player_collision(pl) {
            self.kind()
        } else {
            None
        }
    }
}
