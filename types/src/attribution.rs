//! Per-delegator vote attribution records.
//!
//! These are the values persisted under each delegator address and returned
//! by the lookup API; their serde form is the JSON shape of both the stored
//! and the served record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vote::OptionWeights;

/// Whose ballot decided a delegator's vote totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotedBy {
    /// The delegator voted with its own account.
    Direct,
    /// Totals are inherited from the validators it delegated to.
    Delegated,
}

/// The part of a delegator's weighted vote coming from one validator that voted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorContribution {
    pub validator_address: String,
    pub shares: Decimal,
    pub vote_yes: Decimal,
    pub vote_no: Decimal,
    pub vote_no_with_veto: Decimal,
    pub vote_abstain: Decimal,
}

impl ValidatorContribution {
    pub fn new(validator_address: impl Into<String>, shares: Decimal, votes: OptionWeights) -> Self {
        Self {
            validator_address: validator_address.into(),
            shares,
            vote_yes: votes.yes,
            vote_no: votes.no,
            vote_no_with_veto: votes.no_with_veto,
            vote_abstain: votes.abstain,
        }
    }
}

/// Attributed vote of one delegator on the proposal of interest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionResult {
    pub voter: String,
    pub shares: Decimal,
    pub vote_yes: Decimal,
    pub vote_no: Decimal,
    pub vote_no_with_veto: Decimal,
    pub vote_abstain: Decimal,
    /// Validators that voted, in delegation order. Kept even for direct
    /// voters, where it no longer explains the totals.
    pub validators: Vec<ValidatorContribution>,
    pub voted_by: VotedBy,
}

impl AttributionResult {
    pub fn votes(&self) -> OptionWeights {
        OptionWeights {
            yes: self.vote_yes,
            no: self.vote_no,
            no_with_veto: self.vote_no_with_veto,
            abstain: self.vote_abstain,
        }
    }
}

/// Results of one run keyed by delegator address. Ordered so that two runs
/// over the same input serialise identically.
pub type AttributionSet = BTreeMap<String, AttributionResult>;
