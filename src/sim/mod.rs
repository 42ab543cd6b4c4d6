//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Every random roll comes from an injectable RNG
//! - Stable iteration order (entities are kept in spawn order)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod gear;
pub mod item;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod weather;

pub use boss::{Boss, BossAction, BossPhase};
pub use collision::{Aabb, overlaps};
pub use gear::Gear;
pub use item::{FallingItem, ItemKind, ItemOutcome};
pub use player::{Player, SteamParticle};
pub use projectile::{BreathMode, Projectile};
pub use state::{Bounds, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick, tick_with_rng};
pub use weather::{Weather, WeatherMode};
