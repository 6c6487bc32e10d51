//! The purchase pipeline: validate, authorize, settle, commit.
//!
//! `purchase` is the single entry point that turns a signed payment into
//! a recorded commitment. All checks run before any mutation: a failed
//! purchase consumes no nonce, moves no funds, and records nothing.

use chrono::Utc;
use openpack_assets::AssetRegistry;
use openpack_escrow::EscrowVault;
use openpack_mint::CommitmentLedger;
use openpack_types::{
    AccountId, Currency, Event, EventLog, OpenpackError, Order, Payment, PurchaseId,
    PurchaseReceipt, Result, Sku, Vault, VaultId,
};

use crate::approvals::ApprovalRegistry;
use crate::referral::ReferralSplitter;
use crate::signature::SignatureVerifier;

/// Settles purchases for one processor identity.
///
/// Owns the signer table, the seller approval list, the referral split,
/// and the append-only receipt trail. Asset movement, custody, and
/// commitment recording happen through the collaborators passed into
/// [`PurchaseProcessor::purchase`].
#[derive(Debug)]
pub struct PurchaseProcessor {
    id: AccountId,
    /// Asset token purchases settle in.
    payment_asset: String,
    verifier: SignatureVerifier,
    approvals: ApprovalRegistry,
    referral: ReferralSplitter,
    receipts: Vec<PurchaseReceipt>,
    events: EventLog,
}

impl PurchaseProcessor {
    #[must_use]
    pub fn new(id: AccountId, payment_asset: impl Into<String>) -> Self {
        Self {
            id,
            payment_asset: payment_asset.into(),
            verifier: SignatureVerifier::new(id),
            approvals: ApprovalRegistry::new(),
            referral: ReferralSplitter::default(),
            receipts: Vec::new(),
            events: EventLog::default(),
        }
    }

    /// Replace the default 90/10 referral split.
    pub fn set_referral_split(&mut self, splitter: ReferralSplitter) {
        self.referral = splitter;
    }

    /// Authorize a signing key up to a value ceiling.
    pub fn set_signer_limit(&mut self, signer: AccountId, limit: u64) {
        self.verifier.set_signer_limit(signer, limit);
    }

    /// Grant or revoke a seller's approval for a set of SKUs.
    pub fn set_seller_approval(&mut self, seller: AccountId, skus: &[Sku], approved: bool) {
        self.approvals.set_seller_approval(seller, skus, approved);
    }

    #[must_use]
    pub fn id(&self) -> AccountId {
        self.id
    }

    #[must_use]
    pub fn receipts(&self) -> &[PurchaseReceipt] {
        &self.receipts
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Settle one purchase.
    ///
    /// On success the payment is split and moved (token purchases), a
    /// commitment is recorded for the later mint, and a receipt is
    /// appended and returned. When the payment carries an escrow period,
    /// the seller's token share is custodied in a vault only the seller
    /// can release; the referrer share is always paid out immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn purchase(
        &mut self,
        seller: AccountId,
        sku: Sku,
        payer: AccountId,
        order: &Order,
        payment: &Payment,
        referrer: Option<AccountId>,
        assets: &mut dyn AssetRegistry,
        escrow: &mut EscrowVault,
        commitments: &mut CommitmentLedger,
    ) -> Result<PurchaseReceipt> {
        order.validate()?;
        if order.sku != sku {
            return Err(OpenpackError::UnknownSku(order.sku));
        }
        if !self.approvals.is_approved(seller, sku) {
            return Err(OpenpackError::SellerNotApproved(sku));
        }
        let expected = order.remaining_value();
        if payment.params.value != expected {
            return Err(OpenpackError::InsufficientPayment {
                expected,
                got: payment.params.value,
            });
        }
        // Token purchases: confirm the payer can cover the value before
        // the nonce is consumed, so an underfunded attempt is retryable.
        // Both split legs below settle against this single check, per
        // the [`AssetRegistry`] cross-call contract.
        if order.currency == Currency::OnChainToken {
            let available = assets.balance_of(&self.payment_asset, payer);
            if available < expected {
                return Err(OpenpackError::InsufficientBalance {
                    needed: expected,
                    available,
                });
            }
        }

        let signer = self.verifier.verify(seller, order, payment)?;

        let (seller_share, referrer_share) = self.referral.split(expected, referrer);
        let mut funds_vault = None;
        if order.currency == Currency::OnChainToken {
            if let Some(referrer) = referrer {
                if referrer_share > 0 {
                    assets.transfer(&self.payment_asset, payer, referrer, referrer_share)?;
                }
            }
            if seller_share > 0 {
                if payment.params.escrow_for > 0 {
                    let vault =
                        Vault::fungible(seller, seller, self.payment_asset.clone(), seller_share);
                    funds_vault = Some(escrow.escrow(vault, payer, assets)?);
                } else {
                    assets.transfer(&self.payment_asset, payer, seller, seller_share)?;
                }
            }
        }

        let commitment_id =
            commitments.record(order.asset_recipient, order.quantity, payment.params.escrow_for);

        let receipt = PurchaseReceipt {
            purchase_id: PurchaseId::new(),
            commitment_id,
            sku,
            quantity: order.quantity,
            signer,
            payer,
            currency: order.currency,
            value: expected,
            seller_share,
            referrer_share,
            funds_vault,
            settled_at: Utc::now(),
        };
        self.events.emit(Event::PurchaseSettled {
            purchase_id: receipt.purchase_id,
            commitment_id,
            sku,
            signer,
            value: expected,
        });
        self.events.emit(Event::PaymentSplit {
            seller_share,
            referrer_share,
            referrer,
        });
        tracing::info!(
            purchase_id = %receipt.purchase_id,
            %commitment_id,
            %sku,
            %signer,
            value = expected,
            currency = %order.currency,
            "purchase settled"
        );
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }

    /// Release an escrowed funds vault to `to` on behalf of `caller`.
    pub fn release_funds(
        &mut self,
        id: VaultId,
        to: AccountId,
        caller: AccountId,
        assets: &mut dyn AssetRegistry,
        escrow: &mut EscrowVault,
    ) -> Result<()> {
        escrow.release(id, to, caller, assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use openpack_assets::TokenLedger;
    use openpack_mint::{CommitmentLedger, FixedEntropy};
    use openpack_types::PaymentParams;

    const PROCESSOR: AccountId = AccountId([10u8; 32]);
    const SELLER: AccountId = AccountId([11u8; 32]);
    const BUYER: AccountId = AccountId([12u8; 32]);

    fn sku() -> Sku {
        Sku::from_label("rare-pack")
    }

    fn setup() -> (
        PurchaseProcessor,
        SigningKey,
        TokenLedger,
        EscrowVault,
        CommitmentLedger,
    ) {
        let key = SigningKey::from_bytes(&[42u8; 32]);
        let mut processor = PurchaseProcessor::new(PROCESSOR, "GEM");
        processor.set_signer_limit(AccountId(key.verifying_key().to_bytes()), 1_000_000);
        processor.set_seller_approval(SELLER, &[sku()], true);
        (
            processor,
            key,
            TokenLedger::new(),
            EscrowVault::new(AccountId([99u8; 32])),
            CommitmentLedger::new(Box::new(FixedEntropy::new(1))),
        )
    }

    fn signed(key: &SigningKey, order: &Order, params: PaymentParams) -> Payment {
        Payment::signed(key, PROCESSOR, SELLER, order, params)
    }

    #[test]
    fn fiat_purchase_records_commitment_and_receipt() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let order = Order::dummy(sku(), BUYER, 2, 1499);
        let payment = signed(&key, &order, PaymentParams { escrow_for: 0, nonce: 0, value: 2998 });

        let receipt = processor
            .purchase(
                SELLER, sku(), BUYER, &order, &payment, None,
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap();

        assert_eq!(receipt.value, 2998);
        assert_eq!(receipt.quantity, 2);
        assert_eq!((receipt.seller_share, receipt.referrer_share), (2998, 0));
        assert_eq!(receipt.funds_vault, None);
        assert_eq!(commitments.len(), 1);
        let commitment = commitments.get(receipt.commitment_id).unwrap();
        assert_eq!(commitment.buyer, BUYER);
        assert_eq!(commitment.pack_quantity, 2);
        assert_eq!(processor.receipts().len(), 1);
        assert_eq!(processor.events().count_of("PURCHASE_SETTLED"), 1);
        // Fiat settles off-ledger; nothing moved here.
        assert_eq!(assets.balance_of("GEM", SELLER), 0);
    }

    #[test]
    fn unapproved_seller_rejected() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let other_sku = Sku::from_label("epic-pack");
        let order = Order::dummy(other_sku, BUYER, 1, 1499);
        let payment = Payment::signed(
            &key, PROCESSOR, SELLER, &order,
            PaymentParams { escrow_for: 0, nonce: 0, value: 1499 },
        );

        let err = processor
            .purchase(
                SELLER, other_sku, BUYER, &order, &payment, None,
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap_err();
        assert!(matches!(err, OpenpackError::SellerNotApproved(_)));
        assert!(commitments.is_empty());
    }

    #[test]
    fn sku_mismatch_rejected() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let order = Order::dummy(Sku::from_label("epic-pack"), BUYER, 1, 1499);
        let payment = signed(&key, &order, PaymentParams { escrow_for: 0, nonce: 0, value: 1499 });

        let err = processor
            .purchase(
                SELLER, sku(), BUYER, &order, &payment, None,
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap_err();
        assert!(matches!(err, OpenpackError::UnknownSku(_)));
    }

    #[test]
    fn wrong_value_rejected_without_burning_nonce() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let order = Order::dummy(sku(), BUYER, 1, 1499);
        let short = signed(&key, &order, PaymentParams { escrow_for: 0, nonce: 0, value: 1400 });

        let err = processor
            .purchase(
                SELLER, sku(), BUYER, &order, &short, None,
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            OpenpackError::InsufficientPayment { expected: 1499, got: 1400 }
        ));

        // The same nonce still works with the correct value.
        let exact = signed(&key, &order, PaymentParams { escrow_for: 0, nonce: 0, value: 1499 });
        processor
            .purchase(
                SELLER, sku(), BUYER, &order, &exact, None,
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap();
    }

    #[test]
    fn token_purchase_moves_split_funds() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let referrer = AccountId([13u8; 32]);
        let mut order = Order::dummy(sku(), BUYER, 1, 1000);
        order.currency = Currency::OnChainToken;
        assets.deposit("GEM", BUYER, 1500);
        let payment = signed(&key, &order, PaymentParams { escrow_for: 0, nonce: 0, value: 1000 });

        let receipt = processor
            .purchase(
                SELLER, sku(), BUYER, &order, &payment, Some(referrer),
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap();

        assert_eq!((receipt.seller_share, receipt.referrer_share), (900, 100));
        assert_eq!(assets.balance_of("GEM", SELLER), 900);
        assert_eq!(assets.balance_of("GEM", referrer), 100);
        assert_eq!(assets.balance_of("GEM", BUYER), 500);
    }

    #[test]
    fn exact_balance_covers_both_split_legs() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let referrer = AccountId([13u8; 32]);
        let mut order = Order::dummy(sku(), BUYER, 1, 1000);
        order.currency = Currency::OnChainToken;
        // The single up-front balance check covers the combined value;
        // both transfer legs then settle against an exactly-funded payer.
        assets.deposit("GEM", BUYER, 1000);
        let payment = signed(&key, &order, PaymentParams { escrow_for: 0, nonce: 0, value: 1000 });

        processor
            .purchase(
                SELLER, sku(), BUYER, &order, &payment, Some(referrer),
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap();

        assert_eq!(assets.balance_of("GEM", BUYER), 0);
        assert_eq!(assets.balance_of("GEM", SELLER), 900);
        assert_eq!(assets.balance_of("GEM", referrer), 100);
    }

    #[test]
    fn underfunded_token_purchase_rejected_before_nonce() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let mut order = Order::dummy(sku(), BUYER, 1, 1000);
        order.currency = Currency::OnChainToken;
        assets.deposit("GEM", BUYER, 300);
        let payment = signed(&key, &order, PaymentParams { escrow_for: 0, nonce: 0, value: 1000 });

        let err = processor
            .purchase(
                SELLER, sku(), BUYER, &order, &payment, None,
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap_err();
        assert!(matches!(err, OpenpackError::InsufficientBalance { .. }));

        // Fund the buyer; the identical payment now settles.
        assets.deposit("GEM", BUYER, 700);
        processor
            .purchase(
                SELLER, sku(), BUYER, &order, &payment, None,
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap();
    }

    #[test]
    fn escrowed_token_purchase_vaults_seller_share() {
        let (mut processor, key, mut assets, mut escrow, mut commitments) = setup();
        let referrer = AccountId([13u8; 32]);
        let mut order = Order::dummy(sku(), BUYER, 1, 1000);
        order.currency = Currency::OnChainToken;
        assets.deposit("GEM", BUYER, 1000);
        let payment =
            signed(&key, &order, PaymentParams { escrow_for: 86_400, nonce: 0, value: 1000 });

        let receipt = processor
            .purchase(
                SELLER, sku(), BUYER, &order, &payment, Some(referrer),
                &mut assets, &mut escrow, &mut commitments,
            )
            .unwrap();

        // Referrer paid out immediately; seller share held in custody.
        let vault_id = receipt.funds_vault.unwrap();
        assert_eq!(assets.balance_of("GEM", referrer), 100);
        assert_eq!(assets.balance_of("GEM", SELLER), 0);
        assert_eq!(assets.balance_of("GEM", escrow.custody()), 900);
        let vault = escrow.vault(vault_id).unwrap();
        assert_eq!(vault.releaser, SELLER);

        processor
            .release_funds(vault_id, SELLER, SELLER, &mut assets, &mut escrow)
            .unwrap();
        assert_eq!(assets.balance_of("GEM", SELLER), 900);
    }
}
