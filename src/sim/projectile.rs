//! Boss breath projectiles
//!
//! A breath falls toward the player until parried, then homes on the boss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Bounds;
use crate::tuning::Tuning;

/// Which way a breath is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreathMode {
    /// Falling toward the ground
    Descending,
    /// Deflected by the player, chasing the boss
    Parried,
}

/// A single breath shot by the boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity (px/tick)
    pub vel: Vec2,
    pub mode: BreathMode,
    pub marked_for_removal: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(tuning.breath_width, tuning.breath_height),
            vel: Vec2::new(0.0, tuning.breath_fall_speed),
            mode: BreathMode::Descending,
            marked_for_removal: false,
        }
    }

    #[inline]
    pub fn is_parried(&self) -> bool {
        self.mode == BreathMode::Parried
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Deflect the breath: it stops falling and shoots upward
    pub fn parry(&mut self, tuning: &Tuning) {
        self.mode = BreathMode::Parried;
        self.vel = Vec2::new(0.0, tuning.parry_speed);
    }

    /// Advance one tick. `target` is the boss center while a boss is active.
    pub fn update(&mut self, target: Option<Vec2>, bounds: Bounds, tuning: &Tuning) {
        if self.mode == BreathMode::Parried {
            if let Some(target) = target {
                let dir = (target - self.bounds().center()).normalize_or_zero();
                if dir != Vec2::ZERO {
                    self.vel = dir * tuning.homing_speed;
                }
            }
        }

        self.pos += self.vel;

        if self.is_parried() && self.is_far_offscreen(bounds, tuning.offscreen_margin) {
            self.marked_for_removal = true;
        }
    }

    /// Outside the screen by more than `margin` on any side
    pub fn is_far_offscreen(&self, bounds: Bounds, margin: f32) -> bool {
        self.pos.y < -margin
            || self.pos.y > bounds.height + margin
            || self.pos.x < -margin
            || self.pos.x > bounds.width + margin
    }

    /// An unparried breath whose top has passed the ground
    pub fn hit_ground(&self, bounds: Bounds) -> bool {
        !self.is_parried() && self.pos.y > bounds.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn test_falls_while_descending() {
        let tuning = Tuning::default();
        let mut breath = Projectile::new(1, Vec2::new(100.0, 100.0), &tuning);
        breath.update(Some(Vec2::new(400.0, 0.0)), bounds(), &tuning);
        assert_eq!(breath.pos, Vec2::new(100.0, 105.0));
        assert!(!breath.is_parried());
    }

    #[test]
    fn test_parry_flips_mode_and_speed() {
        let tuning = Tuning::default();
        let mut breath = Projectile::new(1, Vec2::new(100.0, 400.0), &tuning);
        breath.parry(&tuning);
        assert!(breath.is_parried());
        assert_eq!(breath.vel.y, -15.0);
        assert_eq!(breath.vel.x, 0.0);
    }

    #[test]
    fn test_homes_toward_target_every_tick() {
        let tuning = Tuning::default();
        let mut breath = Projectile::new(1, Vec2::new(380.0, 400.0), &tuning);
        breath.parry(&tuning);

        // Target up and to the right
        let target = Vec2::new(700.0, 100.0);
        breath.update(Some(target), bounds(), &tuning);
        assert!((breath.vel.length() - 15.0).abs() < 1e-3);
        assert!(breath.vel.x > 0.0 && breath.vel.y < 0.0);

        // Target moves to the left; velocity is re-aimed
        let target = Vec2::new(0.0, 100.0);
        breath.update(Some(target), bounds(), &tuning);
        assert!(breath.vel.x < 0.0);
    }

    #[test]
    fn test_flies_straight_up_without_target() {
        let tuning = Tuning::default();
        let mut breath = Projectile::new(1, Vec2::new(100.0, 400.0), &tuning);
        breath.parry(&tuning);
        breath.update(None, bounds(), &tuning);
        assert_eq!(breath.pos, Vec2::new(100.0, 385.0));
    }

    #[test]
    fn test_removed_only_far_offscreen() {
        let tuning = Tuning::default();
        let mut breath = Projectile::new(1, Vec2::new(100.0, -150.0), &tuning);
        breath.parry(&tuning);
        breath.update(None, bounds(), &tuning);
        // -165: past the screen edge but within the margin
        assert!(!breath.marked_for_removal);

        for _ in 0..5 {
            breath.update(None, bounds(), &tuning);
        }
        assert!(breath.marked_for_removal);
    }

    #[test]
    fn test_hit_ground_only_when_unparried() {
        let tuning = Tuning::default();
        let mut breath = Projectile::new(1, Vec2::new(100.0, 601.0), &tuning);
        assert!(breath.hit_ground(bounds()));
        breath.parry(&tuning);
        assert!(!breath.hit_ground(bounds()));
    }
}
