//! Sprite catalogue and load tracking
//!
//! Images load asynchronously; anything not yet `Ready` is drawn as a
//! placeholder shape, so the game never waits on the network.

pub mod matte;

#[cfg(target_arch = "wasm32")]
pub mod loader;

use std::collections::HashMap;

use crate::sim::{Gear, ItemKind};
use matte::{MatteColor, MattePreset};

/// Every image the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player(Gear),
    Meat,
    GoodFruit,
    BadFruit(u8),
    Boss,
    Breath,
}

impl SpriteId {
    /// Sprite for a falling item
    pub fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Meat => SpriteId::Meat,
            ItemKind::GoodFruit => SpriteId::GoodFruit,
            ItemKind::BadFruit { variant } => SpriteId::BadFruit(variant),
        }
    }

    /// Full catalogue, given how many bad-fruit variants exist
    pub fn catalogue(bad_fruit_variants: u8) -> Vec<SpriteId> {
        let mut ids: Vec<SpriteId> = Gear::ALL.iter().map(|&g| SpriteId::Player(g)).collect();
        ids.extend([SpriteId::Meat, SpriteId::GoodFruit, SpriteId::Boss, SpriteId::Breath]);
        ids.extend((0..bad_fruit_variants).map(SpriteId::BadFruit));
        ids
    }

    /// Image URL, served from the site root
    pub fn path(&self) -> String {
        match self {
            SpriteId::Player(Gear::One) => "/luffy.png".into(),
            SpriteId::Player(Gear::Two) => "/gear2.png".into(),
            SpriteId::Player(Gear::Four) => "/gear4.png".into(),
            SpriteId::Player(Gear::Snakeman) => "/snakeman.png".into(),
            SpriteId::Player(Gear::Five) => "/gear5.png".into(),
            SpriteId::Meat => "/meat.png".into(),
            SpriteId::GoodFruit => "/devilfruit.png".into(),
            SpriteId::BadFruit(n) => format!("/bad_fruit_{}.png", n + 1),
            SpriteId::Boss => "/kaido.png".into(),
            SpriteId::Breath => "/breath.png".into(),
        }
    }

    /// Backdrop removal applied after the image decodes
    pub fn matte(&self) -> Option<MattePreset> {
        match self {
            SpriteId::Player(Gear::Five) => Some(MattePreset::flood(MatteColor::Black)),
            SpriteId::Player(_) | SpriteId::Boss => Some(MattePreset::flood(MatteColor::White)),
            SpriteId::Meat | SpriteId::GoodFruit | SpriteId::BadFruit(_) => {
                Some(MattePreset::scan(MatteColor::Black, 30))
            }
            SpriteId::Breath => None,
        }
    }
}

/// Load progress of a single sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// Tracks which sprites can be drawn
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    states: HashMap<SpriteId, LoadState>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every sprite in the catalogue pending
    pub fn with_catalogue(bad_fruit_variants: u8) -> Self {
        let mut registry = Self::new();
        for id in SpriteId::catalogue(bad_fruit_variants) {
            registry.states.insert(id, LoadState::Pending);
        }
        registry
    }

    pub fn state(&self, id: SpriteId) -> LoadState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    #[inline]
    pub fn is_ready(&self, id: SpriteId) -> bool {
        self.state(id) == LoadState::Ready
    }

    pub fn mark_ready(&mut self, id: SpriteId) {
        log::debug!("Sprite ready: {:?}", id);
        self.states.insert(id, LoadState::Ready);
    }

    pub fn mark_failed(&mut self, id: SpriteId, reason: &str) {
        log::warn!("Failed to load {}: {}", id.path(), reason);
        self.states.insert(id, LoadState::Failed);
    }

    /// Number of sprites still loading
    pub fn pending(&self) -> usize {
        self.states.values().filter(|s| **s == LoadState::Pending).count()
    }
}
