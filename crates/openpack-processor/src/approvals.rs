//! Seller approvals: which seller may settle purchases for which SKU.

use std::collections::HashSet;

use openpack_types::{AccountId, Sku};

/// Allow-list of `(seller, sku)` pairs.
#[derive(Debug, Default)]
pub struct ApprovalRegistry {
    approved: HashSet<(AccountId, Sku)>,
}

impl ApprovalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant or revoke a seller's approval for a set of SKUs.
    pub fn set_seller_approval(&mut self, seller: AccountId, skus: &[Sku], approved: bool) {
        for &sku in skus {
            if approved {
                self.approved.insert((seller, sku));
            } else {
                self.approved.remove(&(seller, sku));
            }
            tracing::info!(%seller, %sku, approved, "seller approval updated");
        }
    }

    #[must_use]
    pub fn is_approved(&self, seller: AccountId, sku: Sku) -> bool {
        self.approved.contains(&(seller, sku))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_and_revoke() {
        let seller = AccountId([1u8; 32]);
        let rare = Sku::from_label("rare-pack");
        let epic = Sku::from_label("epic-pack");

        let mut registry = ApprovalRegistry::new();
        assert!(!registry.is_approved(seller, rare));

        registry.set_seller_approval(seller, &[rare, epic], true);
        assert!(registry.is_approved(seller, rare));
        assert!(registry.is_approved(seller, epic));

        registry.set_seller_approval(seller, &[rare], false);
        assert!(!registry.is_approved(seller, rare));
        assert!(registry.is_approved(seller, epic));
    }

    #[test]
    fn approval_is_per_seller() {
        let sku = Sku::from_label("pack");
        let mut registry = ApprovalRegistry::new();
        registry.set_seller_approval(AccountId([1u8; 32]), &[sku], true);
        assert!(!registry.is_approved(AccountId([2u8; 32]), sku));
    }
}
