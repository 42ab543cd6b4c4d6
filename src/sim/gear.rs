//! Player power tiers

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Player power tier, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Gear {
    #[default]
    One,
    Two,
    Four,
    Snakeman,
    Five,
}

impl Gear {
    /// All tiers in ascending order
    pub const ALL: [Gear; 5] = [Gear::One, Gear::Two, Gear::Four, Gear::Snakeman, Gear::Five];

    /// Position in the tier ordering (0 = weakest)
    pub fn rank(self) -> u8 {
        match self {
            Gear::One => 0,
            Gear::Two => 1,
            Gear::Four => 2,
            Gear::Snakeman => 3,
            Gear::Five => 4,
        }
    }

    /// Tier earned by a score; thresholds are checked highest first
    pub fn for_score(score: u64, tuning: &Tuning) -> Gear {
        if score >= tuning.gear_five_score {
            Gear::Five
        } else if score >= tuning.snakeman_score {
            Gear::Snakeman
        } else if score >= tuning.gear_four_score {
            Gear::Four
        } else if score >= tuning.gear_two_score {
            Gear::Two
        } else {
            Gear::One
        }
    }

    /// Whether this tier puffs steam particles
    pub fn emits_steam(self) -> bool {
        self == Gear::Two
    }

    /// Whether steam particles are drawn over this tier
    pub fn shows_steam(self) -> bool {
        matches!(self, Gear::Two | Gear::Four)
    }

    /// Sprite scale factor (bigger forms grow upward)
    pub fn draw_scale(self) -> f32 {
        match self {
            Gear::Four | Gear::Five => 1.5,
            _ => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gear::One => "Gear 1",
            Gear::Two => "Gear 2",
            Gear::Four => "Gear 4",
            Gear::Snakeman => "Snakeman",
            Gear::Five => "Gear 5",
        }
    }
}
