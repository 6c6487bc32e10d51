//! Durable event records for the OpenPack audit trail.
//!
//! Every state-changing operation appends a typed [`Event`] to the owning
//! manager's [`EventLog`]. Logs are append-only and serializable; tests
//! and downstream indexers assert on them the way an indexer would consume
//! a ledger's event stream.

use serde::{Deserialize, Serialize};

use crate::{AccountId, CommitmentId, PurchaseId, Sku, Vault, VaultId};

/// A durable, indexable record of one state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A purchase commitment was recorded.
    CommitmentRecorded {
        commitment_id: CommitmentId,
        buyer: AccountId,
        pack_quantity: u64,
    },
    /// Cards were minted; `protos` and `qualities` are index-aligned.
    CardsMinted {
        to: AccountId,
        protos: Vec<u16>,
        qualities: Vec<u8>,
    },
    /// Assets were taken into escrow custody.
    Escrowed { vault_id: VaultId, vault: Vault },
    /// A vault's payload was released to `to`.
    Released { vault_id: VaultId, to: AccountId },
    /// A purchase settled and produced a receipt.
    PurchaseSettled {
        purchase_id: PurchaseId,
        commitment_id: CommitmentId,
        sku: Sku,
        signer: AccountId,
        value: u64,
    },
    /// A settled payment was apportioned between seller and referrer.
    PaymentSplit {
        seller_share: u64,
        referrer_share: u64,
        referrer: Option<AccountId>,
    },
}

impl Event {
    /// Short tag for log lines.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CommitmentRecorded { .. } => "COMMITMENT_RECORDED",
            Self::CardsMinted { .. } => "CARDS_MINTED",
            Self::Escrowed { .. } => "ESCROWED",
            Self::Released { .. } => "RELEASED",
            Self::PurchaseSettled { .. } => "PURCHASE_SETTLED",
            Self::PaymentSplit { .. } => "PAYMENT_SPLIT",
        }
    }
}

/// Append-only event log kept by each stateful manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Events are never removed.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// All events in emission order.
    #[must_use]
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    /// Events matching the given kind tag, in emission order.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    /// Number of events matching the given kind tag.
    #[must_use]
    pub fn count_of(&self, kind: &str) -> usize {
        self.of_kind(kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
