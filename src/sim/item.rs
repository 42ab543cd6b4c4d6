//! Falling items: meat and devil fruits

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Bounds;
use crate::tuning::Tuning;

/// Item variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Meat,
    GoodFruit,
    /// `variant` picks one of several sprites; gameplay is identical
    BadFruit { variant: u8 },
}

impl ItemKind {
    /// Pick a variant from a roll in [0, 1)
    ///
    /// Bad fruit comes back with sprite variant 0; the spawner re-rolls it.
    pub fn from_roll(roll: f32, tuning: &Tuning) -> Self {
        if roll < tuning.good_fruit_chance {
            ItemKind::GoodFruit
        } else if roll < tuning.good_fruit_chance + tuning.bad_fruit_chance {
            ItemKind::BadFruit { variant: 0 }
        } else {
            ItemKind::Meat
        }
    }

    /// Catching it costs a life instead of scoring
    pub fn is_harmful(&self) -> bool {
        matches!(self, ItemKind::BadFruit { .. })
    }
}

/// Result of an item leaving play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Award the given points
    Score(u64),
    /// Lose one life
    Penalty,
    /// Nothing happens
    Safe,
}

/// An item falling from the top of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (px/ms), already scaled by difficulty
    pub speed: f32,
    pub points: u64,
    pub marked_for_removal: bool,
}

impl FallingItem {
    /// Build an item just above the top edge at a random column
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        kind: ItemKind,
        bounds: Bounds,
        difficulty: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let (size, points) = match kind {
            ItemKind::Meat => {
                let scale = tuning.meat_min_scale + rng.random::<f32>() * tuning.meat_scale_range;
                let size = Vec2::new(tuning.meat_width, tuning.meat_height) * scale;
                (size, Self::meat_points(scale))
            }
            ItemKind::GoodFruit | ItemKind::BadFruit { .. } => {
                (Vec2::splat(tuning.fruit_size), tuning.fruit_points)
            }
        };
        let x = rng.random::<f32>() * (bounds.width - size.x).max(0.0);
        Self::new(id, kind, Vec2::new(x, -size.y), size, tuning.item_fall_speed * difficulty, points)
    }

    pub fn new(id: u32, kind: ItemKind, pos: Vec2, size: Vec2, speed: f32, points: u64) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            speed,
            points,
            marked_for_removal: false,
        }
    }

    /// Bigger meat is worth more
    pub fn meat_points(scale: f32) -> u64 {
        ((scale * 2.0).floor() as u64).max(1)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Fall straight down
    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    /// Top edge has passed the bottom of the screen
    pub fn is_below(&self, bounds: Bounds) -> bool {
        self.pos.y > bounds.height
    }

    /// What happens when the player touches it
    pub fn on_catch(&self) -> ItemOutcome {
        if self.kind.is_harmful() {
            ItemOutcome::Penalty
        } else {
            ItemOutcome::Score(self.points)
        }
    }

    /// What happens when it drops off the bottom uncaught
    pub fn on_miss(&self) -> ItemOutcome {
        if self.kind.is_harmful() {
            ItemOutcome::Safe
        } else {
            ItemOutcome::Penalty
        }
    }
}
