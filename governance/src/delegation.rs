//! Delegations to the selected validators, grouped per delegator.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use govtally_genesis::{get_object_array, get_str, Object};
use govtally_types::{Contribution, Decimal, Delegation, DelegationGroup};
use tracing::{debug, info};

use crate::error::{Stage, TallyError};

const STAGE: Stage = Stage::DelegationGrouping;

/// Keep the delegations of `staking.delegations` that target a selected validator.
///
/// `accounts` maps each selected operator address to its account address.
/// Delegations to any other validator are dropped silently. Only retained
/// delegations have their delegator and shares read, so a malformed entry for
/// an unselected validator never fails the run.
pub fn filter_delegations(
    staking: &Object,
    accounts: &HashMap<String, String>,
) -> Result<Vec<Delegation>, TallyError> {
    let delegations = get_object_array(staking, "delegations")
        .ok_or_else(|| TallyError::missing(STAGE, "delegations"))?;

    let mut kept = Vec::new();
    for d in &delegations {
        let validator_address = get_str(d, "validator_address")
            .ok_or_else(|| TallyError::missing(STAGE, "delegations[].validator_address"))?;
        let Some(account) = accounts.get(validator_address) else {
            continue;
        };
        let delegator_address = get_str(d, "delegator_address")
            .ok_or_else(|| TallyError::missing(STAGE, "delegations[].delegator_address"))?;
        let raw = get_str(d, "shares")
            .ok_or_else(|| TallyError::missing(STAGE, "delegations[].shares"))?;
        let shares = Decimal::from_str(raw)
            .map_err(|_| TallyError::invalid_number(STAGE, "delegations[].shares", raw))?;

        kept.push(Delegation {
            delegator_address: delegator_address.to_string(),
            validator_address: validator_address.to_string(),
            validator_account_address: account.clone(),
            shares,
        });
    }

    info!(
        total = delegations.len(),
        kept = kept.len(),
        dropped = delegations.len() - kept.len(),
        "delegations filtered to selected validators"
    );
    Ok(kept)
}

/// Group delegations by delegator, preserving their order within each group.
pub fn group_by_delegator(
    delegations: Vec<Delegation>,
) -> Result<BTreeMap<String, DelegationGroup>, TallyError> {
    let mut groups: BTreeMap<String, DelegationGroup> = BTreeMap::new();
    for d in delegations {
        let group = groups
            .entry(d.delegator_address.clone())
            .or_insert_with(|| DelegationGroup::new(d.delegator_address.clone()));
        let contribution = Contribution {
            validator_address: d.validator_address,
            validator_account_address: d.validator_account_address,
            shares: d.shares,
        };
        group.push(contribution).ok_or_else(|| {
            TallyError::overflow(STAGE, format!("total shares of {}", d.delegator_address))
        })?;
    }
    debug!(delegators = groups.len(), "delegations grouped");
    Ok(groups)
}
