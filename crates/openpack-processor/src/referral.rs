//! The referral split: apportioning a settled payment between the
//! seller and an optional referrer.
//!
//! Shares are integer percent with truncation, and truncation always
//! favors the seller: the referrer share is floored, the seller takes
//! the remainder, and the two always sum to the settled value exactly.

use openpack_types::constants::{
    DEFAULT_REFERRER_SHARE_PERCENT, DEFAULT_SELLER_SHARE_PERCENT, SPLIT_DENOMINATOR,
};
use openpack_types::{AccountId, OpenpackError, Result};

/// Percentage split between seller and referrer.
#[derive(Debug, Clone, Copy)]
pub struct ReferralSplitter {
    seller_percent: u64,
    referrer_percent: u64,
}

impl Default for ReferralSplitter {
    fn default() -> Self {
        Self {
            seller_percent: u64::from(DEFAULT_SELLER_SHARE_PERCENT),
            referrer_percent: u64::from(DEFAULT_REFERRER_SHARE_PERCENT),
        }
    }
}

impl ReferralSplitter {
    /// A custom split. The two shares must sum to 100 percent.
    pub fn new(seller_percent: u64, referrer_percent: u64) -> Result<Self> {
        if seller_percent + referrer_percent != SPLIT_DENOMINATOR {
            return Err(OpenpackError::Internal(format!(
                "referral split {seller_percent}/{referrer_percent} does not sum to {SPLIT_DENOMINATOR}"
            )));
        }
        Ok(Self {
            seller_percent,
            referrer_percent,
        })
    }

    /// Split `amount` into `(seller_share, referrer_share)`.
    ///
    /// Without a referrer the seller takes everything.
    #[must_use]
    pub fn split(&self, amount: u64, referrer: Option<AccountId>) -> (u64, u64) {
        if referrer.is_none() {
            return (amount, 0);
        }
        let referrer_share = (u128::from(amount) * u128::from(self.referrer_percent)
            / u128::from(SPLIT_DENOMINATOR)) as u64;
        (amount - referrer_share, referrer_share)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn referrer() -> Option<AccountId> {
        Some(AccountId([4u8; 32]))
    }

    #[test]
    fn default_split_is_90_10() {
        let splitter = ReferralSplitter::default();
        assert_eq!(splitter.split(1000, referrer()), (900, 100));
    }

    #[test]
    fn no_referrer_means_no_split() {
        let splitter = ReferralSplitter::default();
        assert_eq!(splitter.split(1000, None), (1000, 0));
    }

    #[test]
    fn truncation_favors_the_seller() {
        let splitter = ReferralSplitter::default();
        // 10% of 1499 is 149.9; the referrer gets 149.
        assert_eq!(splitter.split(1499, referrer()), (1350, 149));
        assert_eq!(splitter.split(9, referrer()), (9, 0));
    }

    #[test]
    fn shares_always_sum_to_amount() {
        let splitter = ReferralSplitter::default();
        for amount in 0..1000u64 {
            let (seller, referral) = splitter.split(amount, referrer());
            assert_eq!(seller + referral, amount);
            assert_eq!(referral, amount * 10 / 100);
        }
    }

    #[test]
    fn invalid_split_rejected() {
        assert!(ReferralSplitter::new(80, 10).is_err());
        assert!(ReferralSplitter::new(95, 5).is_ok());
    }
}
