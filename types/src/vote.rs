//! Weighted ballots cast on a proposal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A ballot option of a weighted vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    No,
    NoWithVeto,
    Abstain,
}

impl VoteOption {
    /// Parse the protobuf enum name. Unknown names (including
    /// `VOTE_OPTION_UNSPECIFIED`) return `None`.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "VOTE_OPTION_YES" => Some(Self::Yes),
            "VOTE_OPTION_NO" => Some(Self::No),
            "VOTE_OPTION_NO_WITH_VETO" => Some(Self::NoWithVeto),
            "VOTE_OPTION_ABSTAIN" => Some(Self::Abstain),
            _ => None,
        }
    }
}

/// One decimal per ballot option.
///
/// Used both for a voter's raw weights and for weighted vote totals. Values
/// are never clamped or normalised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionWeights {
    pub yes: Decimal,
    pub no: Decimal,
    pub no_with_veto: Decimal,
    pub abstain: Decimal,
}

impl OptionWeights {
    pub const ZERO: Self = Self {
        yes: Decimal::ZERO,
        no: Decimal::ZERO,
        no_with_veto: Decimal::ZERO,
        abstain: Decimal::ZERO,
    };

    /// Overwrite the weight of one option.
    pub fn set(&mut self, option: VoteOption, weight: Decimal) {
        match option {
            VoteOption::Yes => self.yes = weight,
            VoteOption::No => self.no = weight,
            VoteOption::NoWithVeto => self.no_with_veto = weight,
            VoteOption::Abstain => self.abstain = weight,
        }
    }

    /// Every option multiplied by `shares`. `None` on overflow.
    pub fn scaled(&self, shares: Decimal) -> Option<Self> {
        Some(Self {
            yes: shares.checked_mul(self.yes)?,
            no: shares.checked_mul(self.no)?,
            no_with_veto: shares.checked_mul(self.no_with_veto)?,
            abstain: shares.checked_mul(self.abstain)?,
        })
    }

    /// Option-wise sum. `None` on overflow.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(Self {
            yes: self.yes.checked_add(other.yes)?,
            no: self.no.checked_add(other.no)?,
            no_with_veto: self.no_with_veto.checked_add(other.no_with_veto)?,
            abstain: self.abstain.checked_add(other.abstain)?,
        })
    }
}

/// The ballot one address cast on the proposal of interest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voter: String,
    pub weights: OptionWeights,
}

impl VoteRecord {
    pub fn new(voter: impl Into<String>) -> Self {
        Self {
            voter: voter.into(),
            weights: OptionWeights::ZERO,
        }
    }
}
