//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (held key set)
//! - Time/ticks (fixed-timestep frame clock)
//!
//! Storage lives with `Settings`; sprite loading lives in `assets`.

pub mod input;
pub mod time;

pub use input::KeySet;
pub use time::FrameClock;
