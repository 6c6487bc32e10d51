//! The custody vault store: escrow in, exclusive release out.
//!
//! `EscrowVault` owns every live vault. Two entry points create vaults:
//!
//! - [`EscrowVault::escrow`] pulls an already-existing payload from its
//!   current holder into custody;
//! - [`EscrowVault::callback_escrow`] locks the custody mutex, runs a
//!   caller-supplied callback that is expected to place the payload into
//!   custody directly (the card-mint path), then verifies the payload
//!   actually arrived before the vault is recorded.
//!
//! The mutex makes callback escrow non-reentrant: any `escrow`,
//! `callback_escrow`, or `release` issued from inside a callback fails
//! with `ReentrancyBlocked` instead of observing half-built state.

use std::collections::HashMap;

use openpack_assets::AssetRegistry;
use openpack_types::{
    AccountId, Event, EventLog, OpenpackError, Result, Vault, VaultId, VaultKind,
};

use crate::strategy::{self, TransferStrategy};

/// Interface for the callback half of [`EscrowVault::callback_escrow`].
///
/// The callback runs while the custody mutex is held. It must deliver
/// the vault's payload into the custody account; custody verifies the
/// delivery after the callback returns.
pub trait EscrowCallback {
    fn deliver(
        &mut self,
        escrow: &mut EscrowVault,
        assets: &mut dyn AssetRegistry,
        vault: &Vault,
    ) -> Result<()>;
}

/// The vault custodian.
///
/// Vault ids index into `vaults`; a released vault leaves a `None`
/// tombstone behind so ids stay stable and a second release of the same
/// id is detectable.
#[derive(Debug)]
pub struct EscrowVault {
    /// The account all custodied payloads are held under.
    custody: AccountId,
    /// Live vaults; `None` marks a released slot.
    vaults: Vec<Option<Vault>>,
    /// Reentrancy mutex, held for the duration of a callback escrow.
    mutex_locked: bool,
    /// Per-asset opt-in to the bulk range-transfer path.
    batch_enabled: HashMap<String, bool>,
    /// Per-asset opt-in to the bulk list-transfer path.
    list_enabled: HashMap<String, bool>,
    events: EventLog,
}

impl EscrowVault {
    #[must_use]
    pub fn new(custody: AccountId) -> Self {
        Self {
            custody,
            vaults: Vec::new(),
            mutex_locked: false,
            batch_enabled: HashMap::new(),
            list_enabled: HashMap::new(),
            events: EventLog::default(),
        }
    }

    /// The account custodied payloads are held under.
    #[must_use]
    pub fn custody(&self) -> AccountId {
        self.custody
    }

    /// A live vault by id. `None` for unknown or released ids.
    #[must_use]
    pub fn vault(&self, id: VaultId) -> Option<&Vault> {
        self.vaults.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of vaults ever created (including released ones).
    #[must_use]
    pub fn vault_count(&self) -> usize {
        self.vaults.len()
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Whether the custody mutex is currently held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.mutex_locked
    }

    /// Enable or disable the bulk range-transfer path for an asset type.
    pub fn set_batch_transfer_enabled(&mut self, asset: &str, enabled: bool) {
        self.batch_enabled.insert(asset.to_string(), enabled);
    }

    /// Enable or disable the bulk list-transfer path for an asset type.
    pub fn set_list_transfer_enabled(&mut self, asset: &str, enabled: bool) {
        self.list_enabled.insert(asset.to_string(), enabled);
    }

    fn strategy_for(&self, asset: &str, kind: VaultKind) -> TransferStrategy {
        let enabled = match kind {
            VaultKind::Fungible => false,
            VaultKind::TokenRange => self.batch_enabled.get(asset).copied().unwrap_or(false),
            VaultKind::TokenList => self.list_enabled.get(asset).copied().unwrap_or(false),
        };
        if enabled {
            TransferStrategy::Bulk
        } else {
            TransferStrategy::PerItem
        }
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.mutex_locked {
            return Err(OpenpackError::ReentrancyBlocked);
        }
        Ok(())
    }

    fn store(&mut self, vault: Vault) -> VaultId {
        let id = VaultId(self.vaults.len() as u64);
        self.events.emit(Event::Escrowed {
            vault_id: id,
            vault: vault.clone(),
        });
        tracing::debug!(%id, asset = %vault.asset, player = %vault.player, "vault escrowed");
        self.vaults.push(Some(vault));
        id
    }

    /// Pull `vault`'s payload from `from` into custody and record the vault.
    ///
    /// The payload must already exist under `from`. Fails without
    /// recording anything if the vault is structurally invalid or the
    /// transfer does not complete.
    pub fn escrow(
        &mut self,
        vault: Vault,
        from: AccountId,
        assets: &mut dyn AssetRegistry,
    ) -> Result<VaultId> {
        self.ensure_unlocked()?;
        let kind = vault.classify()?;
        let strategy = self.strategy_for(&vault.asset, kind);
        strategy::move_payload(assets, &vault, kind, from, self.custody, strategy)?;
        Ok(self.store(vault))
    }

    /// Escrow a payload that does not exist yet: lock the mutex, let the
    /// callback deliver the payload into custody, verify it arrived,
    /// then record the vault.
    ///
    /// Verification is payload-kind specific: for token vaults every id
    /// must be owned by custody afterwards; for fungible vaults the
    /// custody balance must have grown by at least the vault's balance.
    /// The callback's word is never taken for either.
    pub fn callback_escrow(
        &mut self,
        vault: Vault,
        assets: &mut dyn AssetRegistry,
        callback: &mut dyn EscrowCallback,
    ) -> Result<VaultId> {
        self.ensure_unlocked()?;
        let kind = vault.classify()?;
        let balance_before = match kind {
            VaultKind::Fungible => assets.balance_of(&vault.asset, self.custody),
            VaultKind::TokenList | VaultKind::TokenRange => 0,
        };

        self.mutex_locked = true;
        let delivered = callback.deliver(self, assets, &vault);
        self.mutex_locked = false;
        delivered?;

        match kind {
            VaultKind::Fungible => {
                let balance_after = assets.balance_of(&vault.asset, self.custody);
                if balance_after < balance_before.saturating_add(vault.balance) {
                    return Err(OpenpackError::TransferRejected {
                        reason: format!(
                            "callback delivered {} of {}, vault requires {}",
                            balance_after.saturating_sub(balance_before),
                            vault.asset,
                            vault.balance
                        ),
                    });
                }
            }
            VaultKind::TokenList | VaultKind::TokenRange => {
                strategy::verify_custody(assets, &vault, self.custody)?;
            }
        }
        Ok(self.store(vault))
    }

    /// Release a vault's payload from custody to `to`.
    ///
    /// Only the vault's releaser may call this, and only once: the slot
    /// is tombstoned after a successful release, so a replay fails with
    /// `VaultAlreadyReleased`. A failed payload transfer leaves the
    /// vault live.
    pub fn release(
        &mut self,
        id: VaultId,
        to: AccountId,
        caller: AccountId,
        assets: &mut dyn AssetRegistry,
    ) -> Result<()> {
        self.ensure_unlocked()?;
        let slot = self
            .vaults
            .get_mut(id.index())
            .ok_or(OpenpackError::VaultNotFound(id))?;
        let vault = slot
            .as_ref()
            .ok_or(OpenpackError::VaultAlreadyReleased(id))?;
        if caller != vault.releaser {
            return Err(OpenpackError::NotReleaser(id));
        }
        let vault = vault.clone();
        let kind = vault.classify()?;
        let strategy = self.strategy_for(&vault.asset, kind);
        strategy::move_payload(assets, &vault, kind, self.custody, to, strategy)?;

        self.vaults[id.index()] = None;
        self.events.emit(Event::Released { vault_id: id, to });
        tracing::debug!(%id, %to, "vault released");
        Ok(())
    }
}
