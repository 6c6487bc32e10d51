//! Error types for the OpenPack settlement core.
//!
//! All errors use the `OP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Signature / payment authorization errors
//! - 2xx: Purchase errors
//! - 3xx: Escrow / vault errors
//! - 4xx: Commitment / mint errors
//! - 5xx: Asset / transfer errors
//! - 9xx: General / internal errors
//!
//! Every error is fatal to its operation: the enclosing operation performs
//! all checks before any mutation, so a returned error means no partial
//! state survives.

use thiserror::Error;

use crate::{CommitmentId, Sku, VaultId};

/// Central error enum for all OpenPack operations.
#[derive(Debug, Error)]
pub enum OpenpackError {
    // =================================================================
    // Signature / Payment Authorization Errors (1xx)
    // =================================================================
    /// The ed25519 signature on the payment did not verify.
    #[error("OP_ERR_100: Invalid payment signature: {reason}")]
    InvalidSignature { reason: String },

    /// The recovered signer's authorized value ceiling is below the payment value.
    #[error("OP_ERR_101: Signer not authorized: limit {limit}, payment value {value}")]
    SignerNotAuthorized { limit: u64, value: u64 },

    /// The (signer, nonce) pair was already consumed (replay prevention).
    #[error("OP_ERR_102: Replayed nonce {nonce} for signer {signer_hex}")]
    ReplayedNonce { signer_hex: String, nonce: u64 },

    // =================================================================
    // Purchase Errors (2xx)
    // =================================================================
    /// The calling seller contract is not approved for this SKU.
    #[error("OP_ERR_200: Seller not approved for {0}")]
    SellerNotApproved(Sku),

    /// The order's SKU does not match the SKU the seller is selling.
    #[error("OP_ERR_201: Unknown SKU: {0}")]
    UnknownSku(Sku),

    /// The payment value does not cover the outstanding order price.
    #[error("OP_ERR_202: Insufficient payment: expected {expected}, got {got}")]
    InsufficientPayment { expected: u64, got: u64 },

    /// The order failed structural validation (zero quantity, bad prices).
    #[error("OP_ERR_203: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    // =================================================================
    // Escrow / Vault Errors (3xx)
    // =================================================================
    /// An asset transfer into or out of custody failed.
    #[error("OP_ERR_300: Transfer rejected: {reason}")]
    TransferRejected { reason: String },

    /// An escrow operation was re-entered while the custody mutex was held.
    #[error("OP_ERR_301: Reentrancy blocked: custody mutex is locked")]
    ReentrancyBlocked,

    /// The vault was already released (idempotency guard).
    #[error("OP_ERR_302: Vault already released: {0}")]
    VaultAlreadyReleased(VaultId),

    /// No vault exists with this identifier.
    #[error("OP_ERR_303: Vault not found: {0}")]
    VaultNotFound(VaultId),

    /// The caller is not the vault's releaser.
    #[error("OP_ERR_304: Caller is not the releaser of {0}")]
    NotReleaser(VaultId),

    /// The vault spec is structurally invalid (no payload, or ambiguous payload).
    #[error("OP_ERR_305: Invalid vault: {reason}")]
    InvalidVault { reason: String },

    // =================================================================
    // Commitment / Mint Errors (4xx)
    // =================================================================
    /// No commitment exists with this identifier.
    #[error("OP_ERR_400: Unknown commitment: {0}")]
    UnknownCommitment(CommitmentId),

    /// The commitment was already resolved (exactly-once guard).
    #[error("OP_ERR_401: Commitment already resolved: {0}")]
    AlreadyResolved(CommitmentId),

    // =================================================================
    // Asset / Transfer Errors (5xx)
    // =================================================================
    /// Not enough balance to perform the operation.
    #[error("OP_ERR_500: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    /// The token id does not exist for this asset.
    #[error("OP_ERR_501: Unknown token {token_id} for asset {asset}")]
    UnknownToken { asset: String, token_id: u64 },

    /// The `from` account does not own the token being transferred.
    #[error("OP_ERR_502: Account does not own token {token_id} of asset {asset}")]
    NotTokenOwner { asset: String, token_id: u64 },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OP_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenpackError>;
