//! Randomized card issuance: resolving commitments into minted packs.
//!
//! The issuer draws every pack from a [`DrawStream`] keyed by the
//! commitment's seed and fresh reveal-time entropy, then applies the
//! rarity floor before minting. Delivery is direct to the buyer unless
//! the commitment carries an escrow period, in which case the cards are
//! minted straight into custody through a callback escrow over the
//! predicted token range.

use openpack_assets::AssetRegistry;
use openpack_escrow::{EscrowCallback, EscrowVault};
use openpack_types::constants::{
    MIN_RARE_OR_BETTER_PER_PACK, MIN_SHINY_LEGENDARY_PER_PACK, SHINY_QUALITY_MAX,
};
use openpack_types::{
    AccountId, Card, CommitmentId, OpenpackError, PackConfig, Rarity, Result, Vault,
};

use crate::draw::DrawStream;
use crate::ledger::CommitmentLedger;
use crate::seed::SeedSource;

/// Resolves commitments into minted card packs.
#[derive(Debug)]
pub struct CardIssuer {
    config: PackConfig,
    seeds: Box<dyn SeedSource>,
}

impl CardIssuer {
    /// Build an issuer over a validated pack configuration.
    pub fn new(config: PackConfig, seeds: Box<dyn SeedSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, seeds })
    }

    #[must_use]
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Mint the cards a commitment is owed.
    ///
    /// Resolves the commitment exactly once. Cards are delivered to the
    /// buyer directly, or into a custody vault (released by `releaser`)
    /// when the commitment carries an escrow period. On any failure the
    /// commitment stays unresolved and can be retried.
    pub fn mint(
        &mut self,
        id: CommitmentId,
        ledger: &mut CommitmentLedger,
        assets: &mut dyn AssetRegistry,
        escrow: &mut EscrowVault,
        releaser: AccountId,
    ) -> Result<Vec<Card>> {
        let commitment = ledger
            .get(id)
            .ok_or(OpenpackError::UnknownCommitment(id))?;
        if commitment.resolved {
            return Err(OpenpackError::AlreadyResolved(id));
        }
        let commitment = commitment.clone();

        let reveal = self.seeds.draw_entropy();
        let mut stream = DrawStream::new(&commitment.seed, &reveal);
        let mut cards =
            Vec::with_capacity(self.config.cards_per_pack * commitment.pack_quantity as usize);
        for _ in 0..commitment.pack_quantity {
            cards.extend(self.draw_pack(&mut stream));
        }

        if commitment.escrow_for > 0 {
            let low = assets.next_token_id(&self.config.card_asset);
            let high = low + cards.len() as u64;
            let vault = Vault::token_range(
                commitment.buyer,
                releaser,
                self.config.card_asset.clone(),
                low,
                high,
            );
            let mut delivery = MintDelivery { cards: &cards };
            escrow.callback_escrow(vault, assets, &mut delivery)?;
        } else {
            assets.mint_cards(&self.config.card_asset, commitment.buyer, &cards)?;
        }

        // Delivery succeeded; consume the commitment last so a failed
        // mint leaves it retryable.
        ledger.resolve(id)?;
        tracing::info!(
            %id,
            buyer = %commitment.buyer,
            cards = cards.len(),
            escrowed = commitment.escrow_for > 0,
            "commitment minted"
        );
        Ok(cards)
    }

    fn draw_pack(&self, stream: &mut DrawStream) -> Vec<Card> {
        let rarity_weights: Vec<u32> = self.config.bands.iter().map(|b| b.weight).collect();
        let mut pack = Vec::with_capacity(self.config.cards_per_pack);
        for _ in 0..self.config.cards_per_pack {
            let band = &self.config.bands[stream.weighted(&rarity_weights)];
            let proto = band.proto_lo + stream.next_range(u64::from(band.proto_count())) as u16;
            let quality = stream.weighted(&self.config.quality_weights) as u8 + 1;
            pack.push(Card::new(proto, quality));
        }
        self.apply_rarity_floor(&mut pack, stream);
        pack
    }

    /// Enforce the per-pack guarantee: at least one shiny legendary and
    /// at least two rare-or-better cards.
    ///
    /// Deficits are fixed by deterministic upgrades of what was drawn,
    /// never by re-rolling the pack, so the guarantee cannot reshuffle
    /// the rest of the draw.
    fn apply_rarity_floor(&self, pack: &mut [Card], stream: &mut DrawStream) {
        let shiny_legendaries = pack
            .iter()
            .filter(|c| self.rarity_of(c) == Rarity::Legendary && c.is_shiny())
            .count();
        if shiny_legendaries < MIN_SHINY_LEGENDARY_PER_PACK {
            if let Some(index) = pack
                .iter()
                .position(|c| self.rarity_of(c) == Rarity::Legendary)
            {
                // A plain legendary exists: promote its finish.
                pack[index].quality = pack[index].quality.min(SHINY_QUALITY_MAX);
            } else if let Some(band) = self.config.band(Rarity::Legendary) {
                // No legendary at all: the weakest slot becomes one.
                let index = self.weakest_slot(pack);
                let proto = band.proto_lo + stream.next_range(u64::from(band.proto_count())) as u16;
                let quality = pack[index].quality.min(SHINY_QUALITY_MAX);
                pack[index] = Card::new(proto, quality);
            }
        }

        while pack
            .iter()
            .filter(|c| self.rarity_of(c).is_rare_or_better())
            .count()
            < MIN_RARE_OR_BETTER_PER_PACK
        {
            let Some(band) = self.config.band(Rarity::Rare) else {
                break;
            };
            let Some(index) = self.weakest_common_slot(pack) else {
                break;
            };
            let proto = band.proto_lo + stream.next_range(u64::from(band.proto_count())) as u16;
            pack[index] = Card::new(proto, pack[index].quality);
        }
    }

    fn rarity_of(&self, card: &Card) -> Rarity {
        self.config
            .rarity_of_proto(card.proto)
            .unwrap_or(Rarity::Common)
    }

    /// Lowest rarity first, plainest finish as the tie-break.
    fn weakest_slot(&self, pack: &[Card]) -> usize {
        pack.iter()
            .enumerate()
            .min_by_key(|(_, c)| (self.rarity_of(c), std::cmp::Reverse(c.quality)))
            .map_or(0, |(index, _)| index)
    }

    fn weakest_common_slot(&self, pack: &[Card]) -> Option<usize> {
        pack.iter()
            .enumerate()
            .filter(|(_, c)| self.rarity_of(c) == Rarity::Common)
            .max_by_key(|(_, c)| c.quality)
            .map(|(index, _)| index)
    }
}

/// Callback that mints the pack's cards directly into custody and checks
/// the minted range against the vault's predicted range.
struct MintDelivery<'a> {
    cards: &'a [Card],
}

impl EscrowCallback for MintDelivery<'_> {
    fn deliver(
        &mut self,
        escrow: &mut EscrowVault,
        assets: &mut dyn AssetRegistry,
        vault: &Vault,
    ) -> Result<()> {
        let (low, high) = assets.mint_cards(&vault.asset, escrow.custody(), self.cards)?;
        if (low, high) != (vault.low_token_id, vault.high_token_id) {
            return Err(OpenpackError::TransferRejected {
                reason: format!(
                    "minted range [{low}, {high}) diverged from predicted [{}, {})",
                    vault.low_token_id, vault.high_token_id
                ),
            });
        }
        Ok(())
    }
}
