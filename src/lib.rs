//! Meat Rush - A single-screen arcade catch-and-parry game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Read-only draw pass over the simulation state
//! - `assets`: Sprite registry and background matte removal
//! - `platform`: Browser/native platform abstraction
//! - `hud`: Score, lives and game-over display
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest real frame delta accepted by the frame clock (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Default play field dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
}
