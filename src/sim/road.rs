//! Procedural road generator
//!
//! The road is a chain of trapezoidal pieces scrolling toward the camera.
//! When a piece passes the near plane it is recycled at the far end, its
//! near edge starting where the previous piece's far edge ended, so the
//! silhouette never has gaps. A slowly wandering curvature value decides how
//! far each new far edge drifts sideways.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::is_inside_triangle;
use super::player::Player;
use super::pool::{Exhausted, Pool, Poolable};
use crate::consts::*;
use crate::ramp_toward;

/// Curvature never leaves [-CURV_LIMIT, CURV_LIMIT]
pub const CURV_LIMIT: f32 = 1.5;
/// Speed at which curvature evolves at its nominal rate
const SPEED_MAX: f32 = 0.060;
const CURVE_MIN: f32 = 10.0;
const CURVE_MAX: f32 = 190.0;
const TARGET_BASE: f32 = 0.05;
const TARGET_SPEED_FACTOR: f32 = 4.0;

/// Decoration distance from the road centre line
pub const DEC_DIST_MIN: f32 = 1.25;
pub const DEC_DIST_MAX: f32 = 2.5;
const DEC_WAIT_MIN: f32 = 1.0;
const DEC_WAIT_MAX: f32 = 20.0;
const DEC_DUAL_PROB: f64 = 0.25;

/// Lateral slack when testing the player against a piece
const COLLISION_DELTA: f32 = 0.05;

/// One trapezoidal ground segment spanning [z, z + depth]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadPiece {
    pub exist: bool,
    /// Centre x at the near edge
    pub start_x: f32,
    /// Centre x at the far edge
    pub end_x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
}

impl Poolable for RoadPiece {
    fn exists(&self) -> bool {
        self.exist
    }
}

impl RoadPiece {
    pub fn new(width: f32, depth: f32) -> Self {
        Self {
            exist: false,
            start_x: 0.0,
            end_x: 0.0,
            z: 0.0,
            width,
            depth,
        }
    }

    pub fn create_self(&mut self, start_x: f32, end_x: f32, z: f32) {
        self.start_x = start_x;
        self.end_x = end_x;
        self.z = z;
        self.exist = true;
    }

    /// Scroll toward the camera; returns true on the tick the piece is recycled
    pub fn update(&mut self, global_speed: f32, near: f32, tm: f32) -> bool {
        if !self.exist {
            return false;
        }

        self.z -= global_speed * tm;
        if self.z < near {
            self.exist = false;
            return true;
        }
        false
    }

    /// Centre line x at depth `z`, if the piece covers it
    pub fn center_at(&self, z: f32) -> Option<f32> {
        if !self.exist || z < self.z || z > self.z + self.depth {
            return None;
        }
        let t = (z - self.z) / self.depth;
        Some(self.start_x + (self.end_x - self.start_x) * t)
    }

    /// Mark the player as on the road if it stands inside this piece
    ///
    /// Only tested while the player was grounded at the last floor check.
    pub fn player_collision(&self, pl: &mut Player) {
        if !self.exist {
            return;
        }

        let p = pl.pos;
        if !pl.can_jump || p.z < self.z || p.z > self.z + self.depth {
            return;
        }

        let w = self.width / 2.0 + COLLISION_DELTA;
        let near_left = Vec2::new(self.start_x - w, self.z);
        let near_right = Vec2::new(self.start_x + w, self.z);
        let far_left = Vec2::new(self.end_x - w, self.z + self.depth);
        let far_right = Vec2::new(self.end_x + w, self.z + self.depth);

        let point = Vec2::new(p.x, p.z);
        if is_inside_triangle(point, near_left, near_right, far_left)
            || is_inside_triangle(point, far_left, far_right, near_right)
        {
            pl.touch_road = true;
        }
    }
}

/// Roadside scenery, recycled like road pieces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Decoration {
    pub exist: bool,
    pub pos: Vec3,
    /// Visual variant (sprite row)
    pub id: u32,
}

impl Poolable for Decoration {
    fn exists(&self) -> bool {
        self.exist
    }
}

impl Decoration {
    pub fn create_self(&mut self, x: f32, y: f32, z: f32, id: u32) {
        self.pos = Vec3::new(x, y, z);
        self.id = id;
        self.exist = true;
    }

    pub fn update(&mut self, global_speed: f32, near: f32, tm: f32) -> bool {
        if !self.exist {
            return false;
        }

        self.pos.z -= global_speed * tm;
        if self.pos.z < near {
            self.exist = false;
            return true;
        }
        false
    }
}

/// A road piece created this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSite {
    pub start_x: f32,
    pub end_x: f32,
    pub z: f32,
}

impl SpawnSite {
    /// Middle of the new piece on the ground plane: (x, z)
    pub fn center(&self) -> (f32, f32) {
        ((self.start_x + self.end_x) / 2.0, self.z + ROAD_STEP / 2.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    pub pieces: Pool<RoadPiece>,
    pub decorations: Pool<Decoration>,

    /// Depth offset from a recycled piece to its replacement
    pub start_pos: f32,
    /// Far edge x of the newest piece
    pub old_x: f32,
    pub creation_x: f32,

    pub curvature: f32,
    /// Rate of change of curvature
    pub curv_delta: f32,
    pub curv_target: f32,
    pub curv_step: f32,
    /// Time left on the current curve segment
    pub curv_timer: f32,

    /// Recycle events until the next decoration batch
    pub dec_timer: f32,

    #[serde(skip)]
    spawn_sites: Vec<SpawnSite>,
}

impl Default for Road {
    fn default() -> Self {
        Self::new()
    }
}

impl Road {
    pub fn new() -> Self {
        let straight = (START_POS / ROAD_STEP) as usize;
        let pieces = Pool::new(ROAD_COUNT, |i| {
            let mut piece = RoadPiece::new(ROAD_WIDTH, ROAD_STEP);
            if i < straight {
                piece.create_self(0.0, 0.0, i as f32 * ROAD_STEP);
            }
            piece
        });

        Self {
            pieces,
            decorations: Pool::new(DEC_COUNT, |_| Decoration::default()),
            start_pos: START_POS,
            old_x: 0.0,
            creation_x: 0.0,
            curvature: 0.0,
            curv_delta: 0.0,
            curv_target: 0.0,
            curv_step: 0.0,
            curv_timer: 0.0,
            dec_timer: 0.0,
            spawn_sites: Vec::with_capacity(ROAD_COUNT),
        }
    }

    /// Set what both pools do when they run out of slots
    pub fn with_policy(mut self, policy: Exhausted) -> Self {
        self.pieces.set_policy(policy);
        self.decorations.set_policy(policy);
        self
    }

    /// Pieces created during the last `update`, in creation order
    pub fn spawn_sites(&self) -> &[SpawnSite] {
        &self.spawn_sites
    }

    /// Road centre line at depth `z`, if a piece covers it
    pub fn center_at(&self, z: f32) -> Option<f32> {
        self.pieces.iter().find_map(|p| p.center_at(z))
    }

    fn create_new_piece(&mut self, dx: f32, z: f32) {
        self.creation_x = self.old_x + dx;

        let z = z + self.start_pos;
        if let Some(piece) = self.pieces.claim().and_then(|i| self.pieces.get_mut(i)) {
            piece.create_self(self.old_x, self.creation_x, z);
            self.spawn_sites.push(SpawnSite {
                start_x: self.old_x,
                end_x: self.creation_x,
                z,
            });
        }

        self.old_x = self.creation_x;
    }

    fn create_decoration<R: Rng>(&mut self, middle: f32, z: f32, dir: f32, rng: &mut R) {
        let dist = rng.random::<f32>() * (DEC_DIST_MAX - DEC_DIST_MIN) + DEC_DIST_MIN;
        let x = middle + dist * dir;
        let z = z + self.start_pos;

        if let Some(dec) = self.decorations.claim().and_then(|i| self.decorations.get_mut(i)) {
            dec.create_self(x, 0.0, z, 0);
        }
    }

    /// Evolve curvature; `speed` scales how fast the road winds
    pub fn update_curvature<R: Rng>(&mut self, speed: f32, rng: &mut R, tm: f32) {
        let factor = speed.abs() / SPEED_MAX;

        self.curv_delta = ramp_toward(self.curv_delta, self.curv_target, self.curv_step * factor, tm);
        self.curvature += self.curv_delta * factor * tm;

        // Bounce back toward straight at the limits
        if self.curvature > CURV_LIMIT {
            self.curv_target = -(self.curvature - CURV_LIMIT).abs();
            self.curv_delta = 0.0;
            self.curvature = CURV_LIMIT;
        } else if self.curvature < -CURV_LIMIT {
            self.curv_target = (self.curvature + CURV_LIMIT).abs();
            self.curv_delta = 0.0;
            self.curvature = -CURV_LIMIT;
        }

        self.curv_timer -= factor * tm;
        if self.curv_timer <= 0.0 {
            self.curv_delta = 0.0;

            self.curv_timer = rng.random::<f32>() * CURVE_MAX + CURVE_MIN;
            // Longer segments may bend harder
            self.curv_target = (rng.random::<f32>() * 2.0 - 1.0)
                * TARGET_BASE
                * (1.0 + TARGET_SPEED_FACTOR * self.curv_timer / (CURVE_MIN + CURVE_MAX));
            self.curv_step = self.curv_target.abs() / self.curv_timer;

            log::debug!(
                "New curve: target {:.4} over {:.1} (curvature {:.3})",
                self.curv_target,
                self.curv_timer,
                self.curvature
            );
        }
    }

    /// Count down one recycle event; on expiry place one or two decorations
    fn update_dec_generator<R: Rng>(&mut self, z: f32, rng: &mut R) {
        self.dec_timer -= 1.0;
        if self.dec_timer > 0.0 {
            return;
        }

        let count = if rng.random_bool(DEC_DUAL_PROB) { 2 } else { 1 };
        for i in 0..count {
            let dir = if count == 1 {
                if rng.random_bool(0.5) { 1.0 } else { -1.0 }
            } else if i == 0 {
                1.0
            } else {
                -1.0
            };
            self.create_decoration(self.old_x, z, dir, rng);
        }

        self.dec_timer += (rng.random::<f32>() * (DEC_WAIT_MAX - DEC_WAIT_MIN) + DEC_WAIT_MIN).floor();
    }

    /// Advance the road one tick at `global_speed`
    ///
    /// Each piece is tested against the player before it may be recycled.
    pub fn update<R: Rng>(&mut self, global_speed: f32, pl: &mut Player, rng: &mut R, tm: f32) {
        self.spawn_sites.clear();

        self.update_curvature(global_speed, rng, tm);

        for i in 0..self.pieces.capacity() {
            let recycled_z = match self.pieces.get_mut(i) {
                Some(piece) => {
                    piece.player_collision(pl);
                    piece.update(global_speed, NEAR, tm).then_some(piece.z)
                }
                None => None,
            };

            if let Some(z) = recycled_z {
                self.update_dec_generator(z, rng);
                self.create_new_piece(self.curvature * CURVATURE_FACTOR, z);
            }
        }

        for dec in self.decorations.iter_mut() {
            dec.update(global_speed, NEAR, tm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grounded_player(x: f32, z: f32) -> Player {
        let mut pl = Player::new(z);
        pl.pos.x = x;
        pl.can_jump = true;
        pl
    }

    #[test]
    fn test_initial_road_is_straight_and_contiguous() {
        let road = Road::new();
        assert_eq!(road.pieces.active_count(), 16);
        for (i, piece) in road.pieces.active().enumerate() {
            assert_eq!(piece.z, i as f32 * ROAD_STEP);
            assert_eq!(piece.start_x, 0.0);
            assert_eq!(piece.end_x, 0.0);
        }
    }

    #[test]
    fn test_piece_recycles_once_past_near() {
        let mut piece = RoadPiece::new(ROAD_WIDTH, ROAD_STEP);
        piece.create_self(0.0, 0.0, 10.0);

        let mut signals = 0;
        let mut expected = 10.0;
        for _ in 0..20 {
            let was_alive = piece.exist;
            if piece.update(1.0, 0.5, 1.0) {
                signals += 1;
            }
            if was_alive {
                expected -= 1.0;
                assert_eq!(piece.z, expected);
            }
        }
        assert_eq!(signals, 1);
        assert!(!piece.exist);
        assert!(piece.z < 0.5);
    }

    #[test]
    fn test_collision_sets_touch_road() {
        let mut piece = RoadPiece::new(ROAD_WIDTH, ROAD_STEP);
        piece.create_self(0.0, 0.2, 0.8);

        let mut pl = grounded_player(0.1, 1.0);
        piece.player_collision(&mut pl);
        assert!(pl.touch_road);

        // Past the inflated edge
        let mut pl = grounded_player(1.0, 1.0);
        piece.player_collision(&mut pl);
        assert!(!pl.touch_road);

        // Outside the piece's depth range
        let mut pl = grounded_player(0.0, 2.0);
        piece.player_collision(&mut pl);
        assert!(!pl.touch_road);
    }

    #[test]
    fn test_airborne_player_not_tested() {
        let mut piece = RoadPiece::new(ROAD_WIDTH, ROAD_STEP);
        piece.create_self(0.0, 0.0, 0.8);
        let mut pl = grounded_player(0.0, 1.0);
        pl.can_jump = false;
        piece.player_collision(&mut pl);
        assert!(!pl.touch_road);
    }

    #[test]
    fn test_center_at_interpolates() {
        let mut piece = RoadPiece::new(ROAD_WIDTH, ROAD_STEP);
        piece.create_self(0.0, 1.0, 2.0);
        assert_eq!(piece.center_at(2.25), Some(0.5));
        assert_eq!(piece.center_at(3.0), None);
    }

    #[test]
    fn test_player_on_initial_road() {
        let mut road = Road::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pl = grounded_player(0.0, PLAYER_Z);
        road.update(0.0, &mut pl, &mut rng, 1.0);
        assert!(pl.touch_road);
    }

    #[test]
    fn test_pieces_chain_without_gaps() {
        let mut road = Road::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pl = grounded_player(0.0, PLAYER_Z);
        let speed = 0.06;

        let mut prev_end = road.old_x;
        let mut spawned = 0;
        for tick in 0..5000 {
            // Pieces crossing the near plane this tick, in slot order
            let recycled: Vec<f32> = road
                .pieces
                .iter()
                .filter(|p| p.exist && p.z - speed < NEAR)
                .map(|p| p.z - speed)
                .collect();

            road.update(speed, &mut pl, &mut rng, 1.0);
            assert_eq!(road.spawn_sites().len(), recycled.len());
            for (site, old_z) in road.spawn_sites().iter().zip(&recycled) {
                assert!((site.z - (old_z + START_POS)).abs() < 1e-5);
                assert_eq!(site.start_x, prev_end);
                let recycled_z = site.z - START_POS;
                assert!(recycled_z < NEAR + 1e-4);
                // The initial straight road already starts behind the near plane
                if tick > 0 {
                    assert!(recycled_z >= NEAR - speed - 1e-4);
                }
                prev_end = site.end_x;
                spawned += 1;
            }
        }
        assert!(spawned > 100);
        // Steady state: every slot that was in use stays in use
        assert_eq!(road.pieces.active_count(), 16);
    }

    #[test]
    fn test_curvature_bounces_off_limit() {
        let mut road = Road::new();
        let mut rng = Pcg32::seed_from_u64(3);
        road.curvature = CURV_LIMIT - 0.001;
        road.curv_delta = 0.01;
        road.curv_target = 0.01;
        road.curv_timer = 100.0;
        road.update_curvature(SPEED_MAX, &mut rng, 1.0);
        assert_eq!(road.curvature, CURV_LIMIT);
        assert_eq!(road.curv_delta, 0.0);
        assert!(road.curv_target < 0.0);
    }

    #[test]
    fn test_curve_reseed() {
        let mut road = Road::new();
        let mut rng = Pcg32::seed_from_u64(11);
        road.update_curvature(SPEED_MAX, &mut rng, 1.0);
        assert!(road.curv_timer >= CURVE_MIN && road.curv_timer <= CURVE_MIN + CURVE_MAX);
        assert!(road.curv_target.abs() <= TARGET_BASE * (1.0 + TARGET_SPEED_FACTOR));
        assert!((road.curv_step - road.curv_target.abs() / road.curv_timer).abs() < 1e-9);
    }

    #[test]
    fn test_standing_still_freezes_curvature() {
        let mut road = Road::new();
        let mut rng = Pcg32::seed_from_u64(5);
        road.update_curvature(SPEED_MAX, &mut rng, 1.0);
        let (c, timer) = (road.curvature, road.curv_timer);
        for _ in 0..100 {
            road.update_curvature(0.0, &mut rng, 1.0);
        }
        assert_eq!(road.curvature, c);
        assert_eq!(road.curv_timer, timer);
    }

    #[test]
    fn test_decorations_beside_road() {
        let mut road = Road::new();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut pl = grounded_player(0.0, PLAYER_Z);
        let speed = 0.06;
        let mut seen = 0;
        for _ in 0..3000 {
            let old_x = road.old_x;
            road.update(speed, &mut pl, &mut rng, 1.0);
            if road.spawn_sites().len() == 1 {
                // Decorations scroll once in the tick they are created
                let z = road.spawn_sites()[0].z - speed;
                for dec in road.decorations.active() {
                    if (dec.pos.z - z).abs() < 1e-5 {
                        let d = (dec.pos.x - old_x).abs();
                        assert!((DEC_DIST_MIN..=DEC_DIST_MAX).contains(&d));
                        seen += 1;
                    }
                }
            }
        }
        assert!(seen > 0);
    }

    #[test]
    fn test_decoration_pair_on_both_sides() {
        let mut pairs = 0;
        for seed in 0..200 {
            let mut road = Road::new();
            road.dec_timer = 1.0;
            let mut rng = Pcg32::seed_from_u64(seed);
            road.update_dec_generator(2.0, &mut rng);

            let placed: Vec<&Decoration> = road.decorations.active().collect();
            assert!(road.dec_timer >= DEC_WAIT_MIN);
            if placed.len() != 2 {
                assert_eq!(placed.len(), 1);
                continue;
            }
            pairs += 1;

            // Right side first, then left
            let right = placed[0].pos.x - road.old_x;
            let left = road.old_x - placed[1].pos.x;
            assert!((DEC_DIST_MIN..=DEC_DIST_MAX).contains(&right));
            assert!((DEC_DIST_MIN..=DEC_DIST_MAX).contains(&left));
            for dec in placed {
                assert_eq!(dec.pos.z, 2.0 + START_POS);
            }
        }
        assert!(pairs > 0);
    }

    proptest! {
        #[test]
        fn prop_curvature_stays_bounded(seed in any::<u64>(), speed in -0.2f32..0.2, tm in 0.1f32..4.0) {
            let mut road = Road::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..3000 {
                road.update_curvature(speed, &mut rng, tm);
                prop_assert!(road.curvature.abs() <= CURV_LIMIT);
            }
        }

        #[test]
        fn prop_road_stays_contiguous(seed in any::<u64>(), speed in 0.0f32..0.12) {
            let mut road = Road::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut pl = grounded_player(0.0, PLAYER_Z);
            let mut prev_end = road.old_x;
            for _ in 0..500 {
                road.update(speed, &mut pl, &mut rng, 1.0);
                for site in road.spawn_sites() {
                    prop_assert_eq!(site.start_x, prev_end);
                    prev_end = site.end_x;
                }
            }
        }
    }
}
