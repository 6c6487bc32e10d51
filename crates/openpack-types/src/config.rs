//! Pack composition configuration: rarity bands and quality weights.

use serde::{Deserialize, Serialize};

use crate::constants::CARDS_PER_PACK;
use crate::{OpenpackError, Rarity, Result};

/// One rarity band: a draw weight and the contiguous prototype-id range
/// `[proto_lo, proto_hi]` (inclusive) that rarity mints from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityBand {
    pub rarity: Rarity,
    /// Relative draw weight within the rarity table.
    pub weight: u32,
    /// Lowest prototype id in this band (inclusive).
    pub proto_lo: u16,
    /// Highest prototype id in this band (inclusive).
    pub proto_hi: u16,
}

impl RarityBand {
    /// Number of distinct prototypes in the band.
    #[must_use]
    pub fn proto_count(&self) -> u16 {
        self.proto_hi - self.proto_lo + 1
    }
}

/// Composition of one pack product: the card asset it mints into, the
/// number of cards per pack, the weighted rarity table, and the weighted
/// quality table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfig {
    /// Asset the cards are minted into (e.g. `"CARD"`).
    pub card_asset: String,
    /// Cards per purchased pack.
    pub cards_per_pack: usize,
    /// Rarity bands in ascending rarity order.
    pub bands: Vec<RarityBand>,
    /// Draw weights for qualities 1 (diamond) through 4 (plain).
    pub quality_weights: [u32; 4],
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            card_asset: "CARD".to_string(),
            cards_per_pack: CARDS_PER_PACK,
            bands: vec![
                RarityBand { rarity: Rarity::Common, weight: 700, proto_lo: 1, proto_hi: 400 },
                RarityBand { rarity: Rarity::Rare, weight: 220, proto_lo: 401, proto_hi: 650 },
                RarityBand { rarity: Rarity::Epic, weight: 62, proto_lo: 651, proto_hi: 800 },
                RarityBand { rarity: Rarity::Legendary, weight: 18, proto_lo: 801, proto_hi: 880 },
            ],
            quality_weights: [2, 6, 16, 76],
        }
    }
}

impl PackConfig {
    /// Structural validation: the rarity table must cover every tier with
    /// positive weights and non-overlapping, ascending prototype ranges,
    /// and the pack must be large enough to satisfy the rarity floor.
    pub fn validate(&self) -> Result<()> {
        if self.cards_per_pack < 2 {
            return Err(OpenpackError::Internal(
                "cards_per_pack below the rarity floor minimum of 2".into(),
            ));
        }
        let expected = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];
        if self.bands.len() != expected.len() {
            return Err(OpenpackError::Internal(format!(
                "rarity table must have {} bands, got {}",
                expected.len(),
                self.bands.len()
            )));
        }
        let mut prev_hi = 0u16;
        for (band, want) in self.bands.iter().zip(expected) {
            if band.rarity != want {
                return Err(OpenpackError::Internal(format!(
                    "rarity bands out of order: expected {want}, got {}",
                    band.rarity
                )));
            }
            if band.weight == 0 {
                return Err(OpenpackError::Internal(format!(
                    "zero draw weight for {}",
                    band.rarity
                )));
            }
            if band.proto_lo <= prev_hi || band.proto_hi < band.proto_lo {
                return Err(OpenpackError::Internal(format!(
                    "invalid prototype range for {}",
                    band.rarity
                )));
            }
            prev_hi = band.proto_hi;
        }
        if self.quality_weights.iter().all(|&w| w == 0) {
            return Err(OpenpackError::Internal("all quality weights are zero".into()));
        }
        Ok(())
    }

    /// The band for a given rarity.
    #[must_use]
    pub fn band(&self, rarity: Rarity) -> Option<&RarityBand> {
        self.bands.iter().find(|b| b.rarity == rarity)
    }

    /// Reverse lookup: which rarity does a prototype id belong to?
    #[must_use]
    pub fn rarity_of_proto(&self, proto: u16) -> Option<Rarity> {
        self.bands
            .iter()
            .find(|b| proto >= b.proto_lo && proto <= b.proto_hi)
            .map(|b| b.rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        PackConfig::default().validate().unwrap();
    }

    #[test]
    fn rarity_of_proto_maps_bands() {
        let config = PackConfig::default();
        assert_eq!(config.rarity_of_proto(1), Some(Rarity::Common));
        assert_eq!(config.rarity_of_proto(400), Some(Rarity::Common));
        assert_eq!(config.rarity_of_proto(401), Some(Rarity::Rare));
        assert_eq!(config.rarity_of_proto(700), Some(Rarity::Epic));
        assert_eq!(config.rarity_of_proto(880), Some(Rarity::Legendary));
        assert_eq!(config.rarity_of_proto(0), None);
        assert_eq!(config.rarity_of_proto(881), None);
    }

    #[test]
    fn overlapping_bands_rejected() {
        let mut config = PackConfig::default();
        config.bands[1].proto_lo = 400;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_weight_rejected() {
        let mut config = PackConfig::default();
        config.bands[3].weight = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_pack_rejected() {
        let mut config = PackConfig::default();
        config.cards_per_pack = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let config = PackConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PackConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
