//! Validators as read from the staking module.

use serde::{Deserialize, Serialize};

/// Bonding status of a validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondStatus {
    Bonded,
    Unbonding,
    Unbonded,
    /// Any status string this crate does not know about.
    Unspecified,
}

impl BondStatus {
    /// Parse the protobuf enum name used in genesis exports.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "BOND_STATUS_BONDED" => Self::Bonded,
            "BOND_STATUS_UNBONDING" => Self::Unbonding,
            "BOND_STATUS_UNBONDED" => Self::Unbonded,
            _ => Self::Unspecified,
        }
    }
}

/// A selected validator together with its derived account address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub operator_address: String,
    pub account_address: String,
    pub tokens: u128,
    pub status: BondStatus,
}
