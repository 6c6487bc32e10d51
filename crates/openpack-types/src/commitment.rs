//! The purchase commitment — the on-ledger half of the two-phase mint.
//!
//! ## State Machine
//!
//! ```text
//!   ┌─────────┐    mint     ┌──────────┐
//!   │ CREATED ├────────────▶│ RESOLVED │  (terminal)
//!   └─────────┘             └──────────┘
//! ```
//!
//! A commitment is created exactly once, at the end of a successful
//! purchase, and captures the seed material that the later mint combines
//! with reveal-time entropy. The `resolved` flag flips false→true exactly
//! once; a second resolve fails. Commitments are never deleted — the
//! ledger is append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, CommitmentId, OpenpackError, Result};

/// A recorded purchase awaiting randomized resolution into minted cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Sequence number, assigned by the ledger.
    pub id: CommitmentId,
    /// Recipient of the minted cards.
    pub buyer: AccountId,
    /// Number of packs purchased.
    pub pack_quantity: u64,
    /// Commit-time entropy, combined with reveal-time entropy at mint.
    pub seed: [u8; 32],
    /// Escrow period carried from the payment; `> 0` means minted cards
    /// are delivered into escrow rather than directly to the buyer.
    pub escrow_for: u64,
    /// Whether this commitment has been resolved into minted cards.
    pub resolved: bool,
    /// When the purchase was settled.
    pub created_at: DateTime<Utc>,
}

impl Commitment {
    /// Flip `resolved` false→true. Fails on a second call — this is the
    /// sole synchronization point guaranteeing exactly-once resolution.
    pub fn mark_resolved(&mut self) -> Result<()> {
        if self.resolved {
            return Err(OpenpackError::AlreadyResolved(self.id));
        }
        self.resolved = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_commitment() -> Commitment {
        Commitment {
            id: CommitmentId(0),
            buyer: AccountId([1u8; 32]),
            pack_quantity: 5,
            seed: [9u8; 32],
            escrow_for: 0,
            resolved: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn resolve_once_succeeds() {
        let mut c = make_commitment();
        assert!(c.mark_resolved().is_ok());
        assert!(c.resolved);
    }

    #[test]
    fn double_resolve_blocked() {
        let mut c = make_commitment();
        c.mark_resolved().unwrap();
        let err = c.mark_resolved().unwrap_err();
        assert!(matches!(err, OpenpackError::AlreadyResolved(id) if id == CommitmentId(0)));
    }

    #[test]
    fn serde_roundtrip() {
        let c = make_commitment();
        let json = serde_json::to_string(&c).unwrap();
        let back: Commitment = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
