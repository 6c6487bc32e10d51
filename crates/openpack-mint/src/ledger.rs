//! The append-only commitment ledger.
//!
//! Purchases record commitments here; the issuer resolves them exactly
//! once into minted cards. Commitments are never deleted or mutated
//! apart from the one-way `resolved` flip.

use chrono::Utc;
use openpack_types::{
    AccountId, Commitment, CommitmentId, Event, EventLog, OpenpackError, Result,
};

use crate::seed::SeedSource;

/// Append-only store of purchase commitments plus the commit-time
/// entropy source that seeds each one.
#[derive(Debug)]
pub struct CommitmentLedger {
    commitments: Vec<Commitment>,
    seeds: Box<dyn SeedSource>,
    events: EventLog,
}

impl CommitmentLedger {
    #[must_use]
    pub fn new(seeds: Box<dyn SeedSource>) -> Self {
        Self {
            commitments: Vec::new(),
            seeds,
            events: EventLog::default(),
        }
    }

    /// Record a new commitment, drawing its commit-time seed.
    pub fn record(&mut self, buyer: AccountId, pack_quantity: u64, escrow_for: u64) -> CommitmentId {
        let id = self
            .commitments
            .last()
            .map_or(CommitmentId(0), |latest| latest.id.next());
        let commitment = Commitment {
            id,
            buyer,
            pack_quantity,
            seed: self.seeds.draw_entropy(),
            escrow_for,
            resolved: false,
            created_at: Utc::now(),
        };
        self.events.emit(Event::CommitmentRecorded {
            commitment_id: id,
            buyer,
            pack_quantity,
        });
        tracing::debug!(%id, %buyer, pack_quantity, escrow_for, "commitment recorded");
        self.commitments.push(commitment);
        id
    }

    /// Flip a commitment to resolved and return its snapshot.
    ///
    /// Fails on unknown ids and on a second resolve of the same id.
    pub fn resolve(&mut self, id: CommitmentId) -> Result<Commitment> {
        let commitment = self
            .commitments
            .get_mut(id.index())
            .ok_or(OpenpackError::UnknownCommitment(id))?;
        commitment.mark_resolved()?;
        Ok(commitment.clone())
    }

    #[must_use]
    pub fn get(&self, id: CommitmentId) -> Option<&Commitment> {
        self.commitments.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}
