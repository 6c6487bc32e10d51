//! # openpack-escrow
//!
//! Vault custody for the settlement core: payloads (fungible funds,
//! token lists, token ranges) are pulled or callback-delivered into a
//! single custody account, recorded as vaults, and released exactly
//! once by each vault's designated releaser.
//!
//! Three properties this crate enforces:
//!
//! - **No reentrancy.** A custody mutex is held across callback escrow;
//!   re-entering any custody operation fails instead of interleaving.
//! - **No trusted claims.** After a callback delivery or a bulk
//!   registry transfer, ownership of every token (or the custody
//!   balance delta) is read back and checked.
//! - **Exactly-once release.** Released vault slots are tombstoned;
//!   replaying a release is an error, not a second payout.

pub mod strategy;
pub mod vaults;

pub use strategy::TransferStrategy;
pub use vaults::{EscrowCallback, EscrowVault};
