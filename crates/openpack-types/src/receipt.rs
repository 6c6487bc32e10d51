//! The purchase receipt: the durable record emitted by every settled purchase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, CommitmentId, Currency, PurchaseId, Sku, VaultId};

/// Durable settlement record for one accepted purchase.
///
/// Receipts form an append-only audit trail keyed by time-ordered
/// [`PurchaseId`]s; the commitment id links the receipt to the later mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Time-ordered audit identifier.
    pub purchase_id: PurchaseId,
    /// The commitment this purchase created.
    pub commitment_id: CommitmentId,
    /// Product purchased.
    pub sku: Sku,
    /// Number of packs purchased.
    pub quantity: u64,
    /// The key that authorized the payment.
    pub signer: AccountId,
    /// The account the funds were pulled from (token purchases).
    pub payer: AccountId,
    /// Denomination of the settled value.
    pub currency: Currency,
    /// Value settled by this purchase (`total_price - already_paid`).
    pub value: u64,
    /// Seller's share of the settled value after the referral split.
    pub seller_share: u64,
    /// Referrer's share of the settled value.
    pub referrer_share: u64,
    /// Funds vault, when the seller share was escrowed instead of paid out.
    pub funds_vault: Option<VaultId>,
    /// When the purchase settled.
    pub settled_at: DateTime<Utc>,
}
