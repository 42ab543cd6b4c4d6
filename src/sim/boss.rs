//! The boss: drops in, patrols, breathes fire, recoils when hit

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Bounds;
use crate::tuning::Tuning;

/// Boss lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Dropping from above the screen to the hover line
    Descending,
    /// Patrolling and attacking at the hover line
    Hovering,
    /// Knocked upward by a hit; still patrols and attacks while recovering
    Recoiling,
    /// Out of hit points, waiting to be cleaned up
    Defeated,
}

/// What a boss update asks the game to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossAction {
    /// Spawn a breath with its top-left corner here
    Breathe(Vec2),
}

/// The boss (at most one at a time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    /// Encounter level (1-based)
    pub level: u32,
    pub phase: BossPhase,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity (px/tick)
    pub vel: Vec2,
    /// Resting altitude
    pub hover_y: f32,
    pub hp: u8,
    pub max_hp: u8,
    /// Time since the last breath (ms)
    pub attack_timer: f32,
    /// Time between breaths, re-rolled after every shot (ms)
    pub attack_interval: f32,
    pub active: bool,
    pub marked_for_removal: bool,
}

impl Boss {
    /// Boss centered above the screen, about to drop in
    pub fn spawn<R: Rng + ?Sized>(level: u32, bounds: Bounds, tuning: &Tuning, rng: &mut R) -> Self {
        let size = Vec2::new(bounds.width * tuning.boss_width_ratio, tuning.boss_height);
        Self {
            level,
            phase: BossPhase::Descending,
            pos: Vec2::new(bounds.width / 2.0 - size.x / 2.0, tuning.boss_spawn_y),
            size,
            vel: Vec2::new(tuning.boss_patrol_speed, tuning.boss_entry_speed),
            hover_y: tuning.boss_hover_y,
            hp: tuning.boss_hp.max(1),
            max_hp: tuning.boss_hp.max(1),
            attack_timer: 0.0,
            attack_interval: Self::roll_interval(tuning, rng),
            active: true,
            marked_for_removal: false,
        }
    }

    fn roll_interval<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> f32 {
        tuning.boss_attack_min_ms + rng.random::<f32>() * tuning.boss_attack_range_ms
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Fraction of hit points left (0-1)
    pub fn health_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }

    /// Advance one tick
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        bounds: Bounds,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<BossAction> {
        match self.phase {
            BossPhase::Defeated => None,
            BossPhase::Descending => {
                self.pos.y += self.vel.y;
                if self.pos.y >= self.hover_y {
                    self.pos.y = self.hover_y;
                    self.vel.y = 0.0;
                    self.phase = BossPhase::Hovering;
                }
                None
            }
            BossPhase::Hovering | BossPhase::Recoiling => {
                self.recover(tuning);
                self.patrol(bounds);
                self.attack(dt, tuning, rng)
            }
        }
    }

    /// Recoil velocity decays under gravity until the boss is back at the hover line
    fn recover(&mut self, tuning: &Tuning) {
        self.pos.y += self.vel.y;
        if self.pos.y < self.hover_y {
            self.vel.y += tuning.boss_gravity;
        } else {
            self.pos.y = self.hover_y;
            self.vel.y = 0.0;
            if self.phase == BossPhase::Recoiling {
                self.phase = BossPhase::Hovering;
            }
        }
    }

    /// Sweep left and right, bouncing off the walls
    fn patrol(&mut self, bounds: Bounds) {
        self.pos.x += self.vel.x;
        let max_x = (bounds.width - self.size.x).max(0.0);
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = -self.vel.x.abs();
        }
    }

    fn attack<R: Rng + ?Sized>(&mut self, dt: f32, tuning: &Tuning, rng: &mut R) -> Option<BossAction> {
        if self.attack_timer > self.attack_interval {
            self.attack_timer = 0.0;
            self.attack_interval = Self::roll_interval(tuning, rng);
            Some(BossAction::Breathe(self.breath_origin(tuning)))
        } else {
            self.attack_timer += dt;
            None
        }
    }

    /// Where a new breath appears: centered under the boss's mouth
    pub fn breath_origin(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0 - tuning.breath_width / 2.0,
            self.pos.y + self.size.y - tuning.breath_width / 2.0,
        )
    }

    /// Take one hit from a parried breath
    pub fn hit(&mut self, tuning: &Tuning) {
        if self.hp == 0 {
            return;
        }
        self.hp -= 1;
        self.vel.y = tuning.boss_recoil_speed;

        if self.hp == 0 {
            self.phase = BossPhase::Defeated;
            self.active = false;
            self.marked_for_removal = true;
        } else {
            self.phase = BossPhase::Recoiling;
        }
    }
}
