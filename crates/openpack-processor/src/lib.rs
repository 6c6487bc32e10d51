//! # openpack-processor
//!
//! The settlement front door: a [`PurchaseProcessor`] turns signed
//! payment authorizations into recorded commitments and receipts.
//!
//! A purchase runs four stages in order, checks strictly before
//! mutations:
//!
//! 1. **Validate** — order structure, SKU match, seller approval,
//!    exact payment value, and (for token purchases) payer funding.
//! 2. **Authorize** — ed25519 verification against the processor-bound
//!    signing payload, the signer's value ceiling, and nonce
//!    consumption ([`SignatureVerifier`]).
//! 3. **Settle** — the 90/10 referral split ([`ReferralSplitter`]);
//!    token funds move now, optionally into a seller-releasable escrow
//!    vault.
//! 4. **Commit** — a commitment is recorded for the later randomized
//!    mint, and the receipt is appended to the audit trail.

pub mod approvals;
pub mod purchase;
pub mod referral;
pub mod signature;

pub use approvals::ApprovalRegistry;
pub use purchase::PurchaseProcessor;
pub use referral::ReferralSplitter;
pub use signature::SignatureVerifier;
