//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here. The defaults are the
//! canonical ruleset; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    pub starting_lives: u8,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the player's feet and the bottom edge
    pub player_bottom_margin: f32,
    /// Horizontal speed (px/ms)
    pub player_speed: f32,
    /// Accumulated time between steam puffs (ms)
    pub steam_interval_ms: f32,
    pub steam_opacity: f32,
    /// Opacity lost per tick
    pub steam_fade: f32,

    // === Gear thresholds (score) ===
    pub gear_two_score: u64,
    pub gear_four_score: u64,
    pub snakeman_score: u64,
    pub gear_five_score: u64,

    // === Items ===
    /// Base fall speed (px/ms), scaled by the difficulty multiplier
    pub item_fall_speed: f32,
    pub meat_width: f32,
    pub meat_height: f32,
    pub meat_min_scale: f32,
    pub meat_scale_range: f32,
    pub fruit_size: f32,
    pub fruit_points: u64,
    /// Roll below this spawns a good fruit
    pub good_fruit_chance: f32,
    /// Roll below `good_fruit_chance + bad_fruit_chance` spawns a bad fruit
    pub bad_fruit_chance: f32,
    pub bad_fruit_variants: u8,
    pub spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    /// Spawn interval reduction per defeated boss (ms)
    pub spawn_interval_step_ms: f32,

    // === Boss ===
    /// Fixed score thresholds for the first encounters
    pub boss_thresholds: Vec<u64>,
    /// Threshold increment past the last fixed entry
    pub boss_threshold_step: u64,
    pub boss_hp: u8,
    pub boss_height: f32,
    /// Boss width as a fraction of the screen width
    pub boss_width_ratio: f32,
    pub boss_hover_y: f32,
    pub boss_spawn_y: f32,
    /// Entry drop speed (px/tick)
    pub boss_entry_speed: f32,
    /// Patrol speed (px/tick)
    pub boss_patrol_speed: f32,
    /// Upward recoil applied on hit (px/tick)
    pub boss_recoil_speed: f32,
    /// Recovery acceleration while above the hover line (px/tick²)
    pub boss_gravity: f32,
    pub boss_attack_min_ms: f32,
    pub boss_attack_range_ms: f32,
    /// Defeat bonus is `boss_defeat_bonus * (level + 1)`
    pub boss_defeat_bonus: u64,

    // === Projectiles ===
    pub breath_width: f32,
    pub breath_height: f32,
    /// Fall speed while unparried (px/tick)
    pub breath_fall_speed: f32,
    /// Vertical speed applied at the moment of a parry (px/tick)
    pub parry_speed: f32,
    /// Homing speed toward the boss (px/tick)
    pub homing_speed: f32,
    /// How far outside the screen a parried breath may travel before removal
    pub offscreen_margin: f32,
    pub parry_points: u64,

    // === Difficulty ===
    pub difficulty_step: f32,

    // === Weather ===
    pub weather_period_ms: f32,
    pub wind_right_chance: f32,
    /// Roll below `wind_right_chance + wind_left_chance` blows left
    pub wind_left_chance: f32,
    /// Drift applied to the player (px/ms)
    pub wind_force: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,

            player_width: 75.0,
            player_height: 120.0,
            player_bottom_margin: 10.0,
            player_speed: 0.6,
            steam_interval_ms: 100.0,
            steam_opacity: 0.8,
            steam_fade: 0.02,

            gear_two_score: 100,
            gear_four_score: 250,
            snakeman_score: 500,
            gear_five_score: 1000,

            item_fall_speed: 0.3,
            meat_width: 60.0,
            meat_height: 40.0,
            meat_min_scale: 0.8,
            meat_scale_range: 0.7,
            fruit_size: 50.0,
            fruit_points: 10,
            good_fruit_chance: 0.2,
            bad_fruit_chance: 0.15,
            bad_fruit_variants: 3,
            spawn_interval_ms: 1000.0,
            min_spawn_interval_ms: 200.0,
            spawn_interval_step_ms: 100.0,

            boss_thresholds: vec![100, 250, 500, 1000],
            boss_threshold_step: 1000,
            boss_hp: 10,
            boss_height: 200.0,
            boss_width_ratio: 0.5,
            boss_hover_y: 0.0,
            boss_spawn_y: -200.0,
            boss_entry_speed: 5.0,
            boss_patrol_speed: 2.0,
            boss_recoil_speed: -15.0,
            boss_gravity: 0.5,
            boss_attack_min_ms: 1000.0,
            boss_attack_range_ms: 2000.0,
            boss_defeat_bonus: 10,

            breath_width: 40.0,
            breath_height: 60.0,
            breath_fall_speed: 5.0,
            parry_speed: -15.0,
            homing_speed: 15.0,
            offscreen_margin: 200.0,
            parry_points: 10,

            difficulty_step: 0.2,

            weather_period_ms: 10_000.0,
            wind_right_chance: 0.3,
            wind_left_chance: 0.3,
            wind_force: 0.1,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Score needed to summon the boss of the given encounter level (0-based)
    pub fn boss_threshold(&self, level: u32) -> u64 {
        let fixed = self.boss_thresholds.len();
        match self.boss_thresholds.get(level as usize) {
            Some(&threshold) => threshold,
            None => {
                let last = self.boss_thresholds.last().copied().unwrap_or(0);
                let beyond = level as u64 + 1 - fixed as u64;
                last + beyond * self.boss_threshold_step
            }
        }
    }

    /// Item spawn interval after `level` boss defeats
    pub fn spawn_interval_for_level(&self, level: u32) -> f32 {
        (self.spawn_interval_ms - level as f32 * self.spawn_interval_step_ms)
            .max(self.min_spawn_interval_ms)
    }

    /// Reward for defeating the boss at the given level (0-based, pre-increment)
    pub fn defeat_bonus(&self, level: u32) -> u64 {
        self.boss_defeat_bonus * (level as u64 + 1)
    }
}
