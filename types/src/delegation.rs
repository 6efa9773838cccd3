//! Delegations to selected validators, raw and grouped per delegator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A delegation that targets one of the selected validators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator_address: String,
    /// Operator address of the validator.
    pub validator_address: String,
    /// Account address derived from `validator_address`.
    pub validator_account_address: String,
    pub shares: Decimal,
}

/// One delegation's share inside a [`DelegationGroup`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub validator_address: String,
    pub validator_account_address: String,
    pub shares: Decimal,
}

/// All surviving delegations of one delegator, in source order.
///
/// `total_shares` is always the sum of `contributions[..].shares`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationGroup {
    pub delegator_address: String,
    pub total_shares: Decimal,
    pub contributions: Vec<Contribution>,
}

impl DelegationGroup {
    pub fn new(delegator_address: impl Into<String>) -> Self {
        Self {
            delegator_address: delegator_address.into(),
            total_shares: Decimal::ZERO,
            contributions: Vec::new(),
        }
    }

    /// Append a contribution and grow the running total.
    ///
    /// Returns `None` if the total would overflow; the group is left unchanged.
    pub fn push(&mut self, contribution: Contribution) -> Option<()> {
        self.total_shares = self.total_shares.checked_add(contribution.shares)?;
        self.contributions.push(contribution);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn contribution(validator: &str, shares: Decimal) -> Contribution {
        Contribution {
            validator_address: validator.to_string(),
            validator_account_address: format!("acc_{validator}"),
            shares,
        }
    }

    #[test]
    fn push_accumulates_total() {
        let mut group = DelegationGroup::new("d1");
        group.push(contribution("v1", dec!(10.5))).unwrap();
        group.push(contribution("v2", dec!(4.5))).unwrap();
        assert_eq!(group.total_shares, dec!(15));
        assert_eq!(group.contributions.len(), 2);
        assert_eq!(group.contributions[0].validator_address, "v1");
    }

    #[test]
    fn push_overflow_leaves_group_untouched() {
        let mut group = DelegationGroup::new("d1");
        group.push(contribution("v1", Decimal::MAX)).unwrap();
        assert!(group.push(contribution("v2", Decimal::MAX)).is_none());
        assert_eq!(group.contributions.len(), 1);
        assert_eq!(group.total_shares, Decimal::MAX);
    }
}
