//! The card model: prototypes, rarity tiers, and quality finishes.

use serde::{Deserialize, Serialize};

use crate::constants::SHINY_QUALITY_MAX;

/// Rarity tier of a card prototype. Ordering is ascending value:
/// `Common < Rare < Epic < Legendary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// `Rare` or better.
    #[must_use]
    pub fn is_rare_or_better(self) -> bool {
        self >= Self::Rare
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "COMMON"),
            Self::Rare => write!(f, "RARE"),
            Self::Epic => write!(f, "EPIC"),
            Self::Legendary => write!(f, "LEGENDARY"),
        }
    }
}

/// One minted collectible: a prototype id plus a quality finish.
///
/// Quality is an ordinal where **lower is better**: 1 diamond, 2 gold,
/// 3 shadow, 4 plain. Qualities `<= 3` are "shiny" finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Prototype identifier; rarity is determined by which configured
    /// prototype band the id falls in.
    pub proto: u16,
    /// Quality finish, 1 (best) through 4 (plain).
    pub quality: u8,
}

impl Card {
    #[must_use]
    pub fn new(proto: u16, quality: u8) -> Self {
        Self { proto, quality }
    }

    /// Premium finish: quality at or below the shiny threshold.
    #[must_use]
    pub fn is_shiny(&self) -> bool {
        self.quality <= SHINY_QUALITY_MAX
    }
}
