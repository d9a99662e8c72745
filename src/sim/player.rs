//! The running player character
//!
//! Only x (lateral) and y (height) are integrated; the player's depth stays
//! fixed and the world scrolls toward it at `speed.z`. Negative y is up, so
//! `pos.y <= 0` means above ground.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::{ButtonState, InputSnapshot};
use super::sprite::{Flip, Sprite};
use crate::ramp_toward;

/// Nominal speed limits
pub const LIMIT_X: f32 = 0.010;
pub const LIMIT_Z: f32 = 0.065;
pub const LIMIT_OFF_ROAD: f32 = 0.020;

// Control
const BRAKE_FACTOR: f32 = 0.001;
const STICK_DELTA: f32 = 0.05;
const X_BONUS: f32 = 3.0;
const GRAVITY: f32 = 0.025;
pub const JUMP_HEIGHT: f32 = 0.045;
pub const DOUBLE_JUMP_HEIGHT: f32 = 0.035;
const JUMP_END_DIVISOR: f32 = 2.0;
pub const ROLL_TIME: f32 = 60.0;
pub const ROLL_BONUS: f32 = 1.5;
pub const ROLL_JUMP_HEIGHT: f32 = 0.0525;
pub const ROLL_JUMP_BONUS: f32 = 1.15;

// Movement
const ACCELERATION_X: f32 = 0.0020;
const ACCELERATION_Z: f32 = 0.0010;
const ACC_OFF_ROAD: f32 = 0.0020;
const GRAVITY_ACC: f32 = 0.002;
const SLOW_MODIF: f32 = 0.80;

// Animation
const ANIM_DELTA: f32 = 0.0001;
const JUMP_DELTA: f32 = 0.01;
const ROLL_SPEED: f32 = 4.0;

// Camera
const CAMERA_MIN_DIST: f32 = 0.0025;
const CAMERA_SPEED_FACTOR: f32 = 8.0;

/// Gem pickup multiplier on forward speed
pub const BOOST_BONUS: f32 = 1.25;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedLimit {
    pub x: f32,
    pub z: f32,
    pub offroad: f32,
}

impl Default for SpeedLimit {
    fn default() -> Self {
        Self {
            x: LIMIT_X,
            z: LIMIT_Z,
            offroad: LIMIT_OFF_ROAD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub speed: Vec3,
    pub target: Vec3,
    pub speed_limit: SpeedLimit,

    /// Grounded at the last floor check
    pub can_jump: bool,
    /// Second jump of this air phase used (or consumed by a roll jump)
    pub double_jump: bool,
    pub rolling: bool,
    /// Ticks of roll left
    pub roll_timer: f32,
    /// Standing on a road piece (set by the road collision pass)
    pub touch_road: bool,
    /// Hit a hazard; ends the run
    pub knocked_out: bool,

    pub flip: Flip,
    pub anim_row: u32,
    pub sprite: Sprite,
}

impl Player {
    pub fn new(z: f32) -> Self {
        Self {
            // Nudged off zero so the first camera step is well defined
            pos: Vec3::new(0.00001, 0.0, z),
            speed: Vec3::ZERO,
            target: Vec3::ZERO,
            speed_limit: SpeedLimit::default(),
            can_jump: false,
            double_jump: false,
            rolling: false,
            roll_timer: 0.0,
            touch_road: false,
            knocked_out: false,
            flip: Flip::None,
            anim_row: 0,
            sprite: Sprite::new(24, 24),
        }
    }

    /// Turn the input snapshot into target speeds and jump/roll transitions
    pub fn control(&mut self, input: &InputSnapshot, tm: f32) {
        let stick = input.stick;

        self.target.x = 0.0;
        self.target.z = 0.0;
        self.target.y = GRAVITY;

        // Horizontal
        self.anim_row = 0;
        self.flip = Flip::None;
        if stick.x.abs() > STICK_DELTA {
            self.target.x = stick.x * self.speed_limit.x;
            // Turning gets sharper the faster we run
            self.target.x *= 1.0 + X_BONUS * self.speed.z.abs() / self.speed_limit.z;

            self.anim_row = 1;
            self.flip = if stick.x < 0.0 {
                Flip::Horizontal
            } else {
                Flip::None
            };
        }

        // Depth
        if !self.rolling && stick.y < -STICK_DELTA {
            let limit = if self.touch_road {
                self.speed_limit.z
            } else {
                self.speed_limit.offroad
            };
            self.target.z = -stick.y * limit;
        }

        // Brakes
        if !self.rolling && stick.y > STICK_DELTA && self.speed.z > 0.0 {
            self.speed.z = (self.speed.z - BRAKE_FACTOR * stick.y.abs() * tm).max(0.0);
            self.target.z = 0.0;
        }

        // Jump
        let jump = input.buttons.fire1;
        let roll = input.buttons.fire2;
        if jump == ButtonState::Pressed {
            if self.can_jump {
                let mut height = JUMP_HEIGHT;
                if self.rolling {
                    // A roll jump uses up the double jump
                    self.double_jump = true;
                    self.rolling = false;

                    height = ROLL_JUMP_HEIGHT;

                    self.speed.z *= ROLL_JUMP_BONUS;
                    self.speed.x *= ROLL_JUMP_BONUS;
                }
                self.speed.y = -height;
            } else if !self.double_jump {
                self.speed.y = -DOUBLE_JUMP_HEIGHT;
                self.double_jump = true;
            }
        } else if self.speed.y < 0.0 && !self.can_jump && jump == ButtonState::Released {
            self.speed.y /= JUMP_END_DIVISOR;
        }

        // Roll
        if !self.rolling && self.can_jump && stick.y < -STICK_DELTA && roll == ButtonState::Pressed {
            self.rolling = true;
            self.roll_timer = ROLL_TIME;

            self.speed.x = self.speed.x.abs() * stick.x * ROLL_BONUS;
            self.speed.z *= ROLL_BONUS;
        } else if self.rolling && self.roll_timer > 0.0 && roll == ButtonState::Released {
            self.roll_timer = 0.0;
        }
    }

    /// Clamp lateral and forward speed back to the nominal limits
    pub fn restrict_speed(&mut self) {
        self.speed.x = self.speed.x.clamp(-self.speed_limit.x, self.speed_limit.x);
        self.speed.z = self.speed.z.min(self.speed_limit.z);
    }

    /// Integrate speeds and position, then resolve the floor
    pub fn move_step(&mut self, tm: f32) {
        // Traction fades as we approach top speed on the road
        let acc_z = if self.touch_road {
            let ratio = self.speed.z / self.speed_limit.z;
            ACCELERATION_Z - (ACCELERATION_Z * SLOW_MODIF) * (ratio * ratio).min(1.0)
        } else {
            ACC_OFF_ROAD
        };

        self.speed.x = ramp_toward(self.speed.x, self.target.x, ACCELERATION_X, tm);
        self.speed.z = ramp_toward(self.speed.z, self.target.z, acc_z, tm);
        self.speed.y = ramp_toward(self.speed.y, self.target.y, GRAVITY_ACC, tm);

        self.pos.x += self.speed.x * tm;
        self.pos.y += self.speed.y * tm;

        // Floor
        self.can_jump = false;
        if self.pos.y >= 0.0 && self.speed.y >= 0.0 {
            if self.double_jump {
                self.restrict_speed();
            }

            self.pos.y = 0.0;
            self.speed.y = 0.0;
            self.can_jump = true;
            self.double_jump = false;
        }

        if self.rolling {
            self.roll_timer -= tm;
            if self.roll_timer <= 0.0 {
                self.roll_timer = 0.0;
                self.rolling = false;
                self.restrict_speed();
            }
        }
    }

    /// Pick the sprite frame from the motion state
    pub fn animate(&mut self, tm: f32) {
        if self.double_jump || self.rolling {
            self.sprite.animate(self.anim_row, 8, 11, ROLL_SPEED, tm);
        } else if !self.can_jump {
            let frame = if self.speed.y < 0.0 {
                if self.speed.y > -JUMP_DELTA { 5 } else { 4 }
            } else {
                (5 + (self.speed.y / JUMP_DELTA).floor() as u32).min(7)
            };
            self.sprite.animate(self.anim_row, frame, frame, 0.0, tm);
        } else {
            let total = self.speed.x.abs().max(self.speed.z.abs());
            if total < ANIM_DELTA {
                self.sprite.animate(self.anim_row, 0, 0, 0.0, tm);
            } else {
                let speed = (12.0 - (total / 0.01).floor()).max(1.0);
                self.sprite.animate(self.anim_row, 0, 3, speed, tm);
            }
        }
    }

    /// Drop the road contact flag once grounded; the road pass sets it again
    pub fn clear_road_contact(&mut self) {
        if self.can_jump {
            self.touch_road = false;
        }
    }

    /// Camera x that follows the player without overshooting
    pub fn update_camera(&self, cam: f32, tm: f32) -> f32 {
        if (self.pos.x - cam).abs() < CAMERA_MIN_DIST {
            return cam;
        }
        cam + (self.pos.x - cam) / CAMERA_SPEED_FACTOR * tm
    }

    /// Gem pickup: a burst of forward speed above the limit
    pub fn boost(&mut self) {
        self.speed.z = self.speed.z.max(self.speed_limit.z) * BOOST_BONUS;
    }

    /// Hazard hit
    pub fn knock_out(&mut self) {
        self.knocked_out = true;
    }
}
