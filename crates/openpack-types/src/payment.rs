//! The signed payment authorization — the off-chain half of a purchase.
//!
//! A [`Payment`] is produced by an authorized signing service after the
//! buyer has paid (by card, or by committing tokens). The signature covers
//! a canonical, domain-separated encoding of the processor identity, the
//! seller identity, the full order, and the payment parameters, so one
//! authorization cannot be replayed against a different processor, a
//! different seller, or a mutated order.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Order};

/// Parameters the signer attaches to a payment authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentParams {
    /// Escrow period in seconds; `0` settles immediately.
    pub escrow_for: u64,
    /// Per-signer replay-prevention nonce, consumed on first use.
    pub nonce: u64,
    /// Authorized value; must equal the order's outstanding price.
    pub value: u64,
}

/// A signed payment authorization for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// The ed25519 public key that produced `signature`.
    pub signer: AccountId,
    /// Escrow period, nonce, and authorized value.
    pub params: PaymentParams,
    /// Ed25519 signature over [`Payment::signing_payload`].
    pub signature: Vec<u8>,
}

impl Payment {
    /// Canonical signing payload.
    ///
    /// Format: `"openpack:payment:v1:" || processor || seller || sku ||
    /// quantity || asset_recipient || change_recipient || total_price ||
    /// already_paid || currency || escrow_for || nonce || value`
    /// (integers little-endian).
    ///
    /// Binding the processor and seller identities prevents cross-contract
    /// replay of an otherwise valid authorization.
    #[must_use]
    pub fn signing_payload(
        processor: AccountId,
        seller: AccountId,
        order: &Order,
        params: &PaymentParams,
    ) -> Vec<u8> {
        let mut payload = Vec::with_capacity(192);
        payload.extend_from_slice(b"openpack:payment:v1:");
        payload.extend_from_slice(&processor.0);
        payload.extend_from_slice(&seller.0);
        payload.extend_from_slice(&order.sku.0);
        payload.extend_from_slice(&order.quantity.to_le_bytes());
        payload.extend_from_slice(&order.asset_recipient.0);
        payload.extend_from_slice(&order.change_recipient.0);
        payload.extend_from_slice(&order.total_price.to_le_bytes());
        payload.extend_from_slice(&order.already_paid.to_le_bytes());
        payload.push(order.currency as u8);
        payload.extend_from_slice(&params.escrow_for.to_le_bytes());
        payload.extend_from_slice(&params.nonce.to_le_bytes());
        payload.extend_from_slice(&params.value.to_le_bytes());
        payload
    }
}

/// Signing helper for tests and tooling. **Never ship signing keys with a node.**
#[cfg(any(test, feature = "test-helpers"))]
impl Payment {
    /// Produce a correctly signed payment for `order` with the given key.
    pub fn signed(
        key: &ed25519_dalek::SigningKey,
        processor: AccountId,
        seller: AccountId,
        order: &Order,
        params: PaymentParams,
    ) -> Self {
        use ed25519_dalek::Signer;
        let payload = Self::signing_payload(processor, seller, order, &params);
        let signature = key.sign(&payload);
        Self {
            signer: AccountId(key.verifying_key().to_bytes()),
            params,
            signature: signature.to_bytes().to_vec(),
        }
    }
}
