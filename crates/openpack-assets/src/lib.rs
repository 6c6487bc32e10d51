//! # openpack-assets
//!
//! The asset-registry seam between the settlement core and whatever
//! actually holds balances and issues collectible instances.
//!
//! The core never implements token semantics — it calls the
//! [`AssetRegistry`] trait for every balance read, transfer, and mint.
//! [`TokenLedger`] is the in-memory reference implementation used by the
//! test surface and by single-process deployments.
//!
//! ## Why both batch and per-item transfer entry points
//!
//! Escrow chooses between `batch_transfer`/`list_transfer` and repeated
//! `transfer_token` calls per asset-type policy flag. A registry's batch
//! path may be faster but cannot be assumed correct — custody re-verifies
//! ownership after every batch call (see `openpack-escrow`).

pub mod ledger;
pub mod registry;

pub use ledger::TokenLedger;
pub use registry::AssetRegistry;
