//! # openpack-mint
//!
//! The randomized-issuance half of the settlement core: an append-only
//! [`CommitmentLedger`] records what each purchase is owed, and the
//! [`CardIssuer`] later resolves each commitment exactly once into a
//! deterministic card draw.
//!
//! Randomness is split in two. The ledger seeds every commitment at
//! record time; the issuer adds reveal-time entropy at mint. The card
//! sequence is then a pure function of both halves (see [`DrawStream`]),
//! so no single party picks the outcome and any mint can be replayed
//! for audit.
//!
//! Every pack is post-processed by the rarity floor: at least one shiny
//! legendary and at least two rare-or-better cards, enforced by
//! upgrading drawn cards rather than re-rolling them.

pub mod draw;
pub mod issuer;
pub mod ledger;
pub mod seed;

pub use draw::DrawStream;
pub use issuer::CardIssuer;
pub use ledger::CommitmentLedger;
pub use seed::{FixedEntropy, OsEntropy, SeedSource};
