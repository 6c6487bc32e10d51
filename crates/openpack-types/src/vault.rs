//! The vault model: one escrow record custodying a typed asset payload.
//!
//! A vault carries exactly one payload kind, chosen by which fields are
//! populated (mirroring the wire-level struct of the custody contract this
//! core fronts):
//!
//! - `balance > 0` — fungible units;
//! - non-empty `token_ids` — an explicit, possibly non-contiguous token list;
//! - `high_token_id > low_token_id` — a contiguous token range `[low, high)`.
//!
//! A vault with none of these (or a fungible balance mixed with tokens) is
//! structurally invalid.

use serde::{Deserialize, Serialize};

use crate::{AccountId, OpenpackError, Result};

/// The payload kind of a vault, derived from its populated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaultKind {
    /// `balance` fungible units of `asset`.
    Fungible,
    /// The explicit `token_ids` list.
    TokenList,
    /// The contiguous id range `[low_token_id, high_token_id)`.
    TokenRange,
}

impl std::fmt::Display for VaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fungible => write!(f, "FUNGIBLE"),
            Self::TokenList => write!(f, "TOKEN_LIST"),
            Self::TokenRange => write!(f, "TOKEN_RANGE"),
        }
    }
}

/// An escrow record custodying funds or items for a beneficiary under a
/// releaser's exclusive control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// The beneficiary the payload is held for.
    pub player: AccountId,
    /// The only account allowed to release this vault.
    pub releaser: AccountId,
    /// Asset type of the payload (e.g. `"CARD"`, `"GEM"`).
    pub asset: String,
    /// Fungible payload, if any.
    pub balance: u64,
    /// Inclusive lower bound of the contiguous token range.
    pub low_token_id: u64,
    /// Exclusive upper bound of the contiguous token range.
    pub high_token_id: u64,
    /// Explicit token list for non-contiguous payloads.
    pub token_ids: Vec<u64>,
}

impl Vault {
    /// Fungible-balance vault.
    #[must_use]
    pub fn fungible(
        player: AccountId,
        releaser: AccountId,
        asset: impl Into<String>,
        balance: u64,
    ) -> Self {
        Self {
            player,
            releaser,
            asset: asset.into(),
            balance,
            low_token_id: 0,
            high_token_id: 0,
            token_ids: Vec::new(),
        }
    }

    /// Contiguous token-range vault over `[low, high)`.
    #[must_use]
    pub fn token_range(
        player: AccountId,
        releaser: AccountId,
        asset: impl Into<String>,
        low: u64,
        high: u64,
    ) -> Self {
        Self {
            player,
            releaser,
            asset: asset.into(),
            balance: 0,
            low_token_id: low,
            high_token_id: high,
            token_ids: Vec::new(),
        }
    }

    /// Explicit token-list vault.
    #[must_use]
    pub fn token_list(
        player: AccountId,
        releaser: AccountId,
        asset: impl Into<String>,
        token_ids: Vec<u64>,
    ) -> Self {
        Self {
            player,
            releaser,
            asset: asset.into(),
            balance: 0,
            low_token_id: 0,
            high_token_id: 0,
            token_ids,
        }
    }

    /// Determine the payload kind, rejecting empty or ambiguous vaults.
    ///
    /// Precedence matches the custody contract: fungible balance first,
    /// then explicit list, then range.
    pub fn classify(&self) -> Result<VaultKind> {
        if self.balance > 0 {
            if !self.token_ids.is_empty() || self.high_token_id > self.low_token_id {
                return Err(OpenpackError::InvalidVault {
                    reason: "vault mixes fungible balance with token payload".into(),
                });
            }
            return Ok(VaultKind::Fungible);
        }
        if !self.token_ids.is_empty() {
            return Ok(VaultKind::TokenList);
        }
        if self.high_token_id > self.low_token_id {
            return Ok(VaultKind::TokenRange);
        }
        Err(OpenpackError::InvalidVault {
            reason: "vault has no payload".into(),
        })
    }

    /// Number of discrete tokens custodied (0 for fungible vaults).
    #[must_use]
    pub fn token_count(&self) -> u64 {
        if !self.token_ids.is_empty() {
            self.token_ids.len() as u64
        } else {
            self.high_token_id.saturating_sub(self.low_token_id)
        }
    }

    /// Iterator over the discrete token ids custodied by this vault.
    pub fn iter_token_ids(&self) -> Box<dyn Iterator<Item = u64> + '_> {
        if self.token_ids.is_empty() {
            Box::new(self.low_token_id..self.high_token_id)
        } else {
            Box::new(self.token_ids.iter().copied())
        }
    }
}
