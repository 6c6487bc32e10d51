//! The [`AssetRegistry`] trait: every balance, ownership, and mint
//! primitive the settlement core consumes.

use openpack_types::{AccountId, Card, Result};

/// External asset registry interface.
///
/// Implementations hold the actual balances and card tokens; the core
/// only moves them. All mutating calls are fallible and must be atomic:
/// on error, no partial transfer may survive.
///
/// Settlement also relies on a cross-call contract: it pre-checks the
/// payer's balance once for a purchase's combined value, then runs the
/// referrer and seller legs as separate `transfer` calls. A registry
/// must only fail `transfer` for insufficient balance (and token moves
/// only for unknown or unowned ids); rejecting a covered transfer for
/// any other reason can strand a purchase between legs.
pub trait AssetRegistry {
    /// Fungible balance of `account` in `asset`.
    fn balance_of(&self, asset: &str, account: AccountId) -> u64;

    /// Move `amount` fungible units of `asset` from `from` to `to`.
    ///
    /// Must succeed whenever `from` holds at least `amount`.
    fn transfer(&mut self, asset: &str, from: AccountId, to: AccountId, amount: u64) -> Result<()>;

    /// Current owner of a token, if it exists.
    fn owner_of(&self, asset: &str, token_id: u64) -> Option<AccountId>;

    /// Move a single token.
    fn transfer_token(
        &mut self,
        asset: &str,
        from: AccountId,
        to: AccountId,
        token_id: u64,
    ) -> Result<()>;

    /// Move the contiguous token range `[low, high)` in one call.
    ///
    /// Callers must not trust success blindly — a registry's batch path
    /// may misreport. Custody verifies ownership afterwards.
    fn batch_transfer(
        &mut self,
        asset: &str,
        from: AccountId,
        to: AccountId,
        low: u64,
        high: u64,
    ) -> Result<()>;

    /// Move an explicit token-id list in one call. Same trust caveat as
    /// [`AssetRegistry::batch_transfer`].
    fn list_transfer(
        &mut self,
        asset: &str,
        from: AccountId,
        to: AccountId,
        token_ids: &[u64],
    ) -> Result<()>;

    /// The id the next minted token of `asset` will receive.
    ///
    /// Used by callback escrow to predict the range a mint callback will
    /// fill, before the mint happens.
    fn next_token_id(&self, asset: &str) -> u64;

    /// Mint one token per card into `to`, returning the id range
    /// `[low, high)` actually minted. Emits the registry's `CardsMinted`
    /// record with the full prototype/quality sequence.
    fn mint_cards(&mut self, asset: &str, to: AccountId, cards: &[Card]) -> Result<(u64, u64)>;
}
