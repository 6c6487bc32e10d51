//! Transfer strategy: how a vault's payload is moved between accounts.
//!
//! Token payloads can move either one `transfer_token` call per id or
//! through the registry's `batch_transfer`/`list_transfer` fast path.
//! The fast path is opt-in per asset type because a registry's bulk
//! implementation cannot be assumed honest: after any bulk call the
//! destination's ownership of every id is re-checked, and a shortfall
//! fails the whole move.

use openpack_assets::AssetRegistry;
use openpack_types::{AccountId, OpenpackError, Result, Vault, VaultKind};

/// How the discrete tokens of a vault are transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStrategy {
    /// One registry call per token id.
    PerItem,
    /// One bulk registry call, followed by ownership verification.
    Bulk,
}

/// Move a vault's full payload from `from` to `to`.
///
/// `kind` must be the result of [`Vault::classify`] on this vault. Any
/// registry failure is surfaced as `TransferRejected`; the registry
/// contract guarantees no partial move survives an error.
pub(crate) fn move_payload(
    assets: &mut dyn AssetRegistry,
    vault: &Vault,
    kind: VaultKind,
    from: AccountId,
    to: AccountId,
    strategy: TransferStrategy,
) -> Result<()> {
    match kind {
        VaultKind::Fungible => assets
            .transfer(&vault.asset, from, to, vault.balance)
            .map_err(|err| OpenpackError::TransferRejected {
                reason: format!("fungible transfer failed: {err}"),
            }),
        VaultKind::TokenRange => match strategy {
            TransferStrategy::Bulk => {
                assets
                    .batch_transfer(&vault.asset, from, to, vault.low_token_id, vault.high_token_id)
                    .map_err(|err| OpenpackError::TransferRejected {
                        reason: format!("batch transfer failed: {err}"),
                    })?;
                verify_custody(assets, vault, to)
            }
            TransferStrategy::PerItem => per_item(assets, vault, from, to),
        },
        VaultKind::TokenList => match strategy {
            TransferStrategy::Bulk => {
                assets
                    .list_transfer(&vault.asset, from, to, &vault.token_ids)
                    .map_err(|err| OpenpackError::TransferRejected {
                        reason: format!("list transfer failed: {err}"),
                    })?;
                verify_custody(assets, vault, to)
            }
            TransferStrategy::PerItem => per_item(assets, vault, from, to),
        },
    }
}

fn per_item(
    assets: &mut dyn AssetRegistry,
    vault: &Vault,
    from: AccountId,
    to: AccountId,
) -> Result<()> {
    for token_id in vault.iter_token_ids() {
        assets
            .transfer_token(&vault.asset, from, to, token_id)
            .map_err(|err| OpenpackError::TransferRejected {
                reason: format!("token {token_id} transfer failed: {err}"),
            })?;
    }
    Ok(())
}

/// Check that `holder` actually owns every discrete token of `vault`.
///
/// This is the defense against a registry whose bulk path reports
/// success without moving anything: claims are never trusted, ownership
/// is read back.
pub(crate) fn verify_custody(
    assets: &dyn AssetRegistry,
    vault: &Vault,
    holder: AccountId,
) -> Result<()> {
    for token_id in vault.iter_token_ids() {
        if assets.owner_of(&vault.asset, token_id) != Some(holder) {
            return Err(OpenpackError::TransferRejected {
                reason: format!(
                    "token {token_id} of {} not held by {holder} after transfer",
                    vault.asset
                ),
            });
        }
    }
    Ok(())
}
