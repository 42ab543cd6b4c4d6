//! Game state and core simulation types
//!
//! The orchestrator owns everything here; entities never reach back into it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::gear::Gear;
use super::item::{FallingItem, ItemKind};
use super::player::Player;
use super::projectile::Projectile;
use super::weather::{Weather, WeatherMode};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::Tuning;

/// Play field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives exhausted (terminal)
    GameOver,
}

/// Something that happened during a tick, for the HUD and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    LivesChanged { lives: u8 },
    GearChanged { gear: Gear },
    WeatherChanged { mode: WeatherMode },
    ItemSpawned { id: u32, kind: ItemKind },
    ItemCollected { id: u32, kind: ItemKind },
    ItemMissed { id: u32, kind: ItemKind },
    BossSpawned { level: u32 },
    Parried { id: u32 },
    BossHit { hp: u8 },
    BossDefeated { level: u32, bonus: u64 },
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for every roll the simulation makes; serialized so a
    /// snapshot resumes the same sequence
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub bounds: Bounds,
    pub phase: GamePhase,
    /// Only ever increases
    pub score: u64,
    pub lives: u8,
    /// Number of bosses defeated so far
    pub boss_level: u32,
    /// Scales item fall speed; grows after each boss defeat
    pub difficulty: f32,
    /// Time since the last item spawn (ms)
    pub spawn_timer: f32,
    /// Time between item spawns (ms)
    pub spawn_interval: f32,
    pub weather: Weather,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub items: Vec<FallingItem>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Bounds::default())
    }

    /// Create a new session with explicit balance and screen size
    pub fn with_config(seed: u64, tuning: Tuning, bounds: Bounds) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(bounds, &tuning),
            lives: tuning.starting_lives,
            spawn_interval: tuning.spawn_interval_ms,
            tuning,
            bounds,
            phase: GamePhase::Playing,
            score: 0,
            boss_level: 0,
            difficulty: 1.0,
            spawn_timer: 0.0,
            weather: Weather::default(),
            time_ticks: 0,
            items: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Score needed to summon the next boss
    pub fn next_boss_threshold(&self) -> u64 {
        self.tuning.boss_threshold(self.boss_level)
    }

    /// Add points and record the change
    pub fn award(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    /// Take one life. Latches game over when none remain.
    pub fn lose_life(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LivesChanged { lives: self.lives });
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over! Final score: {}", self.score);
        }
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
