//! Combining delegation groups with ballots into per-delegator results.

use std::collections::{BTreeMap, HashMap};

use govtally_types::{
    AttributionResult, AttributionSet, DelegationGroup, OptionWeights, ValidatorContribution,
    VoteRecord, VotedBy,
};
use tracing::{debug, info};

use crate::error::{Stage, TallyError};

const STAGE: Stage = Stage::Attribution;

/// Attribute a vote to every delegator in `groups`.
///
/// For each contribution whose validator account has a ballot, the ballot's
/// weights scaled by the contribution's shares are accumulated and listed in
/// `validators`. Contributions to validators that did not vote add nothing and
/// are left out of the list. If the delegator has its own ballot, the totals
/// are `total_shares × ballot` and the result is marked direct; the validator
/// list is still computed, but its contributions are not summed.
pub fn attribute_votes(
    groups: &BTreeMap<String, DelegationGroup>,
    votes: &HashMap<String, VoteRecord>,
) -> Result<AttributionSet, TallyError> {
    let mut results = AttributionSet::new();
    let mut direct = 0usize;
    for (delegator, group) in groups {
        let result = attribute_one(delegator, group, votes)?;
        if result.voted_by == VotedBy::Direct {
            direct += 1;
        }
        results.insert(delegator.clone(), result);
    }
    info!(
        delegators = results.len(),
        direct,
        delegated = results.len() - direct,
        "votes attributed"
    );
    Ok(results)
}

fn attribute_one(
    delegator: &str,
    group: &DelegationGroup,
    votes: &HashMap<String, VoteRecord>,
) -> Result<AttributionResult, TallyError> {
    let overflow = || TallyError::overflow(STAGE, format!("vote totals of {delegator}"));

    let own = votes.get(delegator);
    let mut totals = OptionWeights::ZERO;
    let mut validators = Vec::new();
    for c in &group.contributions {
        let Some(ballot) = votes.get(&c.validator_account_address) else {
            continue;
        };
        let weighted = ballot.weights.scaled(c.shares).ok_or_else(overflow)?;
        if own.is_none() {
            totals = totals.checked_add(&weighted).ok_or_else(overflow)?;
        }
        validators.push(ValidatorContribution::new(
            c.validator_address.clone(),
            c.shares,
            weighted,
        ));
    }

    let mut voted_by = VotedBy::Delegated;
    if let Some(own) = own {
        totals = own.weights.scaled(group.total_shares).ok_or_else(overflow)?;
        voted_by = VotedBy::Direct;
        debug!(delegator, "direct ballot overrides inherited votes");
    }

    Ok(AttributionResult {
        voter: delegator.to_string(),
        shares: group.total_shares,
        vote_yes: totals.yes,
        vote_no: totals.no,
        vote_no_with_veto: totals.no_with_veto,
        vote_abstain: totals.abstain,
        validators,
        voted_by,
    })
}
