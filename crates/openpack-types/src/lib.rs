//! # openpack-types
//!
//! Shared types, errors, and configuration for the **OpenPack** settlement
//! core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`Sku`], [`CommitmentId`], [`VaultId`], [`PurchaseId`]
//! - **Order model**: [`Order`], [`Currency`]
//! - **Payment model**: [`Payment`], [`PaymentParams`]
//! - **Commitment model**: [`Commitment`]
//! - **Vault model**: [`Vault`], [`VaultKind`]
//! - **Card model**: [`Card`], [`Rarity`]
//! - **Receipt model**: [`PurchaseReceipt`]
//! - **Events**: [`Event`], [`EventLog`]
//! - **Configuration**: [`PackConfig`], [`RarityBand`]
//! - **Errors**: [`OpenpackError`] with `OP_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod card;
pub mod commitment;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod order;
pub mod payment;
pub mod receipt;
pub mod vault;

// Re-export all primary types at crate root for ergonomic imports:
//   use openpack_types::{Order, Payment, Commitment, Vault, Card, ...};

pub use card::*;
pub use commitment::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use order::*;
pub use payment::*;
pub use receipt::*;
pub use vault::*;

// Constants are accessed via `openpack_types::constants::FOO`
// (not re-exported to avoid name collisions).
