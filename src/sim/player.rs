//! The player character and its steam puffs

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::gear::Gear;
use super::state::Bounds;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// A rising, fading steam puff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteamParticle {
    pub pos: Vec2,
    pub radius: f32,
    /// 0-1, decreases every tick; removed once fully transparent
    pub opacity: f32,
    /// Upward drift per tick (px)
    pub rise: f32,
}

/// The player (lives for the whole session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (px/ms)
    pub speed: f32,
    pub gear: Gear,
    pub steam: Vec<SteamParticle>,
    /// Time accumulated toward the next steam puff (ms)
    pub steam_timer: f32,
}

impl Player {
    /// Player standing centered at the bottom of the screen
    pub fn new(bounds: Bounds, tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(
                bounds.width / 2.0 - size.x / 2.0,
                bounds.height - size.y - tuning.player_bottom_margin,
            ),
            size,
            speed: tuning.player_speed,
            gear: Gear::One,
            steam: Vec::new(),
            steam_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Keep the player fully on screen horizontally
    pub fn clamp_to(&mut self, bounds: Bounds) {
        let max_x = (bounds.width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Switch power tier. Returns true if the tier actually changed.
    pub fn set_gear(&mut self, gear: Gear) -> bool {
        if self.gear == gear {
            return false;
        }
        log::debug!("Gear {} -> {}", self.gear.as_str(), gear.as_str());
        self.gear = gear;
        true
    }

    /// Move from held keys, then advance the steam puffs
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        input: &TickInput,
        dt: f32,
        bounds: Bounds,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        if input.left {
            self.pos.x -= self.speed * dt;
        }
        if input.right {
            self.pos.x += self.speed * dt;
        }
        self.clamp_to(bounds);

        if self.gear.emits_steam() {
            if self.steam_timer > tuning.steam_interval_ms {
                let offset = Vec2::new(
                    rng.random::<f32>() * self.size.x,
                    rng.random::<f32>() * self.size.y,
                );
                self.steam.push(SteamParticle {
                    pos: self.pos + offset,
                    radius: rng.random::<f32>() * 5.0 + 2.0,
                    opacity: tuning.steam_opacity,
                    rise: rng.random::<f32>() + 0.5,
                });
                self.steam_timer = 0.0;
            } else {
                self.steam_timer += dt;
            }
        }

        for puff in &mut self.steam {
            puff.pos.y -= puff.rise;
            puff.opacity -= tuning.steam_fade;
        }
        self.steam.retain(|p| p.opacity > 0.0);
    }
}
