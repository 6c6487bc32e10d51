//! The order model: what a buyer is purchasing and how it is denominated.

use serde::{Deserialize, Serialize};

use crate::{AccountId, OpenpackError, Result, Sku};

/// How an order's `total_price` and the payment `value` are denominated.
///
/// Off-chain signers use this to decide the amount they authorize: token
/// purchases settle on the ledger, fiat purchases settle with the payment
/// provider and only record the settlement here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Settled in the configured on-ledger payment token.
    OnChainToken = 0,
    /// Settled off-ledger in US cents (credit card flow).
    UsdCents = 1,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnChainToken => write!(f, "TOKEN"),
            Self::UsdCents => write!(f, "USD_CENTS"),
        }
    }
}

/// A purchase order for `quantity` packs of one SKU.
///
/// The order itself carries no signature — it is bound into the signed
/// payment payload (see [`crate::Payment`]), so any mutation after signing
/// invalidates the authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Number of packs purchased. Must be positive.
    pub quantity: u64,
    /// The product being purchased.
    pub sku: Sku,
    /// Where the minted cards are delivered.
    pub asset_recipient: AccountId,
    /// Where overpayment / refunds are returned.
    pub change_recipient: AccountId,
    /// Full price of the order in `currency` minor units.
    pub total_price: u64,
    /// Portion of `total_price` settled by an earlier payment.
    pub already_paid: u64,
    /// Denomination of `total_price` and the payment value.
    pub currency: Currency,
}

impl Order {
    /// Structural validation: `quantity > 0` and `total_price >= already_paid`.
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(OpenpackError::InvalidOrder {
                reason: "quantity must be positive".into(),
            });
        }
        if self.already_paid > self.total_price {
            return Err(OpenpackError::InvalidOrder {
                reason: format!(
                    "already_paid {} exceeds total_price {}",
                    self.already_paid, self.total_price
                ),
            });
        }
        Ok(())
    }

    /// The amount still owed: `total_price - already_paid`.
    ///
    /// A valid payment must authorize exactly this value.
    #[must_use]
    pub fn remaining_value(&self) -> u64 {
        self.total_price.saturating_sub(self.already_paid)
    }
}

/// Dummy order for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// One-buyer order for `quantity` packs at `unit_price` each, nothing prepaid.
    pub fn dummy(sku: Sku, buyer: AccountId, quantity: u64, unit_price: u64) -> Self {
        Self {
            quantity,
            sku,
            asset_recipient: buyer,
            change_recipient: buyer,
            total_price: unit_price * quantity,
            already_paid: 0,
            currency: Currency::UsdCents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_order() -> Order {
        Order::dummy(Sku::from_label("pack"), AccountId([1u8; 32]), 2, 1499)
    }

    #[test]
    fn valid_order_passes() {
        let order = make_order();
        assert!(order.validate().is_ok());
        assert_eq!(order.remaining_value(), 2998);
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut order = make_order();
        order.quantity = 0;
        let err = order.validate().unwrap_err();
        assert!(matches!(err, OpenpackError::InvalidOrder { .. }));
    }

    #[test]
    fn overpaid_order_rejected() {
        let mut order = make_order();
        order.already_paid = order.total_price + 1;
        let err = order.validate().unwrap_err();
        assert!(matches!(err, OpenpackError::InvalidOrder { .. }));
    }

    #[test]
    fn remaining_value_subtracts_already_paid() {
        let mut order = make_order();
        order.already_paid = 1000;
        assert_eq!(order.remaining_value(), 1998);
    }

    #[test]
    fn currency_display() {
        assert_eq!(format!("{}", Currency::OnChainToken), "TOKEN");
        assert_eq!(format!("{}", Currency::UsdCents), "USD_CENTS");
    }

    #[test]
    fn serde_roundtrip() {
        let order = make_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }
}
