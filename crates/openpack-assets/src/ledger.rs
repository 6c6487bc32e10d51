//! In-memory reference implementation of [`AssetRegistry`].

use std::collections::HashMap;

use openpack_types::{AccountId, Card, Event, EventLog, OpenpackError, Result};

use crate::registry::AssetRegistry;

/// In-memory multi-asset ledger: fungible balances, card tokens, and the
/// `CardsMinted` event stream.
///
/// Token ids are allocated per asset from a monotonic counter, so a mint
/// of `n` cards always produces one contiguous range.
#[derive(Debug, Default)]
pub struct TokenLedger {
    /// `(asset, account) → balance` for fungible assets.
    balances: HashMap<(String, AccountId), u64>,
    /// `(asset, token_id) → owner` for discrete tokens.
    owners: HashMap<(String, u64), AccountId>,
    /// `(asset, token_id) → card data` recorded at mint.
    cards: HashMap<(String, u64), Card>,
    /// Next token id per asset.
    next_token: HashMap<String, u64>,
    /// Durable event records (`CardsMinted`).
    events: EventLog,
}

impl TokenLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit fungible balance out of thin air (test funding / faucet).
    pub fn deposit(&mut self, asset: &str, account: AccountId, amount: u64) {
        *self
            .balances
            .entry((asset.to_string(), account))
            .or_default() += amount;
    }

    /// Card data recorded for a minted token.
    #[must_use]
    pub fn card(&self, asset: &str, token_id: u64) -> Option<Card> {
        self.cards.get(&(asset.to_string(), token_id)).copied()
    }

    /// The ledger's event log.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn owned_token(&self, asset: &str, from: AccountId, token_id: u64) -> Result<()> {
        match self.owners.get(&(asset.to_string(), token_id)) {
            None => Err(OpenpackError::UnknownToken {
                asset: asset.to_string(),
                token_id,
            }),
            Some(owner) if *owner != from => Err(OpenpackError::NotTokenOwner {
                asset: asset.to_string(),
                token_id,
            }),
            Some(_) => Ok(()),
        }
    }
}

impl AssetRegistry for TokenLedger {
    fn balance_of(&self, asset: &str, account: AccountId) -> u64 {
        self.balances
            .get(&(asset.to_string(), account))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(&mut self, asset: &str, from: AccountId, to: AccountId, amount: u64) -> Result<()> {
        let available = self.balance_of(asset, from);
        if available < amount {
            return Err(OpenpackError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        *self
            .balances
            .entry((asset.to_string(), from))
            .or_default() -= amount;
        *self.balances.entry((asset.to_string(), to)).or_default() += amount;
        Ok(())
    }

    fn owner_of(&self, asset: &str, token_id: u64) -> Option<AccountId> {
        self.owners.get(&(asset.to_string(), token_id)).copied()
    }

    fn transfer_token(
        &mut self,
        asset: &str,
        from: AccountId,
        to: AccountId,
        token_id: u64,
    ) -> Result<()> {
        self.owned_token(asset, from, token_id)?;
        self.owners.insert((asset.to_string(), token_id), to);
        Ok(())
    }

    fn batch_transfer(
        &mut self,
        asset: &str,
        from: AccountId,
        to: AccountId,
        low: u64,
        high: u64,
    ) -> Result<()> {
        // Check the whole range before moving anything; a half-moved
        // batch must never survive.
        for token_id in low..high {
            self.owned_token(asset, from, token_id)?;
        }
        for token_id in low..high {
            self.owners.insert((asset.to_string(), token_id), to);
        }
        Ok(())
    }

    fn list_transfer(
        &mut self,
        asset: &str,
        from: AccountId,
        to: AccountId,
        token_ids: &[u64],
    ) -> Result<()> {
        for &token_id in token_ids {
            self.owned_token(asset, from, token_id)?;
        }
        for &token_id in token_ids {
            self.owners.insert((asset.to_string(), token_id), to);
        }
        Ok(())
    }

    fn next_token_id(&self, asset: &str) -> u64 {
        self.next_token.get(asset).copied().unwrap_or(0)
    }

    fn mint_cards(&mut self, asset: &str, to: AccountId, cards: &[Card]) -> Result<(u64, u64)> {
        let low = self.next_token_id(asset);
        let high = low + cards.len() as u64;
        for (offset, card) in cards.iter().enumerate() {
            let token_id = low + offset as u64;
            self.owners.insert((asset.to_string(), token_id), to);
            self.cards.insert((asset.to_string(), token_id), *card);
        }
        self.next_token.insert(asset.to_string(), high);

        self.events.emit(Event::CardsMinted {
            to,
            protos: cards.iter().map(|c| c.proto).collect(),
            qualities: cards.iter().map(|c| c.quality).collect(),
        });
        tracing::debug!(asset, %to, count = cards.len(), low, high, "minted cards");
        Ok((low, high))
    }
}
