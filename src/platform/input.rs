//! Keyboard state
//!
//! The browser reports key names on keydown/keyup; the set of held keys is
//! turned into a `TickInput` once per frame.

use std::collections::HashSet;

use crate::sim::TickInput;

const LEFT_KEYS: [&str; 3] = ["ArrowLeft", "a", "A"];
const RIGHT_KEYS: [&str; 3] = ["ArrowRight", "d", "D"];

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    held: HashSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Drop everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Whether the key drives the player and should not scroll the page
    pub fn is_game_key(key: &str) -> bool {
        LEFT_KEYS.contains(&key) || RIGHT_KEYS.contains(&key)
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: LEFT_KEYS.iter().any(|k| self.is_held(k)),
            right: RIGHT_KEYS.iter().any(|k| self.is_held(k)),
        }
    }
}
