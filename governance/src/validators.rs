//! Selection of the active validator set.

use std::collections::HashMap;

use govtally_genesis::{get_number, get_object, get_object_array, get_str, Object};
use govtally_types::{AddressConverter, BondStatus, Validator};
use tracing::{debug, info};

use crate::error::{Stage, TallyError};

const STAGE: Stage = Stage::ValidatorSelection;

/// Pick the validators whose delegators are attributed.
///
/// Keeps `BOND_STATUS_BONDED` validators, orders them by tokens (descending,
/// stable for ties), truncates to `params.max_validators` and derives each
/// survivor's account address. `staking` is the `app_state.staking` object.
pub fn select_validators<C>(staking: &Object, converter: &C) -> Result<Vec<Validator>, TallyError>
where
    C: AddressConverter + ?Sized,
{
    let params =
        get_object(staking, "params").ok_or_else(|| TallyError::missing(STAGE, "params"))?;
    let max_validators = get_number(params, "max_validators")
        .ok_or_else(|| TallyError::missing(STAGE, "params.max_validators"))?;
    // Float → usize truncates toward zero and saturates; negatives become 0.
    let max_validators = max_validators as usize;

    let validators = get_object_array(staking, "validators")
        .ok_or_else(|| TallyError::missing(STAGE, "validators"))?;

    let mut bonded = Vec::new();
    for v in validators {
        let status = get_str(v, "status").map(BondStatus::from_wire);
        if status != Some(BondStatus::Bonded) {
            continue;
        }
        let raw = get_str(v, "tokens")
            .ok_or_else(|| TallyError::missing(STAGE, "validators[].tokens"))?;
        let tokens: u128 = raw
            .parse()
            .map_err(|_| TallyError::invalid_number(STAGE, "validators[].tokens", raw))?;
        bonded.push((v, tokens));
    }
    let bonded_count = bonded.len();

    // `sort_by` is stable: equal token counts keep their export order.
    bonded.sort_by(|a, b| b.1.cmp(&a.1));
    bonded.truncate(max_validators);

    let mut selected = Vec::with_capacity(bonded.len());
    for (v, tokens) in bonded {
        let operator_address = get_str(v, "operator_address")
            .ok_or_else(|| TallyError::missing(STAGE, "validators[].operator_address"))?;
        let account_address = converter.operator_to_account(operator_address);
        if account_address.is_empty() {
            return Err(TallyError::missing(
                STAGE,
                format!("account address of {operator_address}"),
            ));
        }
        debug!(
            operator = operator_address,
            account = %account_address,
            tokens = %tokens,
            "validator selected"
        );
        selected.push(Validator {
            operator_address: operator_address.to_string(),
            account_address,
            tokens,
            status: BondStatus::Bonded,
        });
    }

    info!(
        bonded = bonded_count,
        selected = selected.len(),
        max_validators,
        "validator set selected"
    );
    Ok(selected)
}

/// Operator address → account address lookup for the selected set.
pub fn account_index(validators: &[Validator]) -> HashMap<String, String> {
    validators
        .iter()
        .map(|v| (v.operator_address.clone(), v.account_address.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_account(op: &str) -> String {
        op.replace("valoper", "")
    }

    fn staking(v: Value) -> Object {
        v.as_object().cloned().unwrap()
    }

    fn validator(op: &str, tokens: &str, status: &str) -> Value {
        json!({"operator_address": op, "tokens": tokens, "status": status})
    }

    #[test]
    fn truncates_to_max_validators_by_tokens() {
        let s = staking(json!({
            "params": {"max_validators": 2},
            "validators": [
                validator("valoper_a", "100", "BOND_STATUS_BONDED"),
                validator("valoper_b", "300", "BOND_STATUS_BONDED"),
                validator("valoper_c", "200", "BOND_STATUS_BONDED"),
            ]
        }));
        let selected = select_validators(&s, &to_account).unwrap();
        let tokens: Vec<u128> = selected.iter().map(|v| v.tokens).collect();
        assert_eq!(tokens, vec![300, 200]);
        assert_eq!(selected[0].operator_address, "valoper_b");
        assert_eq!(selected[0].account_address, "_b");
    }

    #[test]
    fn only_bonded_validators_are_selected() {
        let s = staking(json!({
            "params": {"max_validators": 10},
            "validators": [
                validator("valoper_a", "900", "BOND_STATUS_UNBONDING"),
                validator("valoper_b", "800", "BOND_STATUS_UNBONDED"),
                validator("valoper_c", "10", "BOND_STATUS_BONDED"),
                {"operator_address": "valoper_d", "tokens": "1000"},
            ]
        }));
        let selected = select_validators(&s, &to_account).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].operator_address, "valoper_c");
    }

    #[test]
    fn ties_keep_export_order() {
        let s = staking(json!({
            "params": {"max_validators": 3},
            "validators": [
                validator("valoper_x", "50", "BOND_STATUS_BONDED"),
                validator("valoper_y", "70", "BOND_STATUS_BONDED"),
                validator("valoper_z", "50", "BOND_STATUS_BONDED"),
                validator("valoper_w", "50", "BOND_STATUS_BONDED"),
            ]
        }));
        let ops: Vec<String> = select_validators(&s, &to_account)
            .unwrap()
            .into_iter()
            .map(|v| v.operator_address)
            .collect();
        assert_eq!(ops, vec!["valoper_y", "valoper_x", "valoper_z"]);
    }

    #[test]
    fn float_max_validators_is_truncated() {
        let s = staking(json!({
            "params": {"max_validators": 1.9},
            "validators": [
                validator("valoper_a", "1", "BOND_STATUS_BONDED"),
                validator("valoper_b", "2", "BOND_STATUS_BONDED"),
            ]
        }));
        assert_eq!(select_validators(&s, &to_account).unwrap().len(), 1);
    }

    #[test]
    fn tokens_beyond_u64_are_ranked() {
        let s = staking(json!({
            "params": {"max_validators": 1},
            "validators": [
                validator("valoper_a", "18446744073709551615", "BOND_STATUS_BONDED"),
                validator("valoper_b", "18446744073709551616", "BOND_STATUS_BONDED"),
            ]
        }));
        assert_eq!(
            select_validators(&s, &to_account).unwrap()[0].operator_address,
            "valoper_b"
        );
    }

    #[test]
    fn missing_max_validators() {
        let s = staking(json!({"params": {}, "validators": []}));
        assert_eq!(
            select_validators(&s, &to_account),
            Err(TallyError::missing(STAGE, "params.max_validators"))
        );
    }

    #[test]
    fn malformed_validator_list() {
        let s = staking(json!({"params": {"max_validators": 1}, "validators": [1, 2]}));
        assert_eq!(
            select_validators(&s, &to_account),
            Err(TallyError::missing(STAGE, "validators"))
        );
    }

    #[test]
    fn unparsable_tokens() {
        let s = staking(json!({
            "params": {"max_validators": 1},
            "validators": [validator("valoper_a", "12a", "BOND_STATUS_BONDED")]
        }));
        assert_eq!(
            select_validators(&s, &to_account),
            Err(TallyError::invalid_number(STAGE, "validators[].tokens", "12a"))
        );
    }

    #[test]
    fn missing_operator_address_only_matters_when_selected() {
        let s = staking(json!({
            "params": {"max_validators": 1},
            "validators": [
                validator("valoper_a", "10", "BOND_STATUS_BONDED"),
                {"tokens": "1", "status": "BOND_STATUS_BONDED"},
            ]
        }));
        assert!(select_validators(&s, &to_account).is_ok());

        let s = staking(json!({
            "params": {"max_validators": 2},
            "validators": [
                validator("valoper_a", "10", "BOND_STATUS_BONDED"),
                {"tokens": "1", "status": "BOND_STATUS_BONDED"},
            ]
        }));
        assert_eq!(
            select_validators(&s, &to_account),
            Err(TallyError::missing(STAGE, "validators[].operator_address"))
        );
    }

    #[test]
    fn failed_address_conversion_is_fatal() {
        let s = staking(json!({
            "params": {"max_validators": 1},
            "validators": [validator("garbage", "10", "BOND_STATUS_BONDED")]
        }));
        let failing = |_: &str| String::new();
        assert!(matches!(
            select_validators(&s, &failing),
            Err(TallyError::MissingField { .. })
        ));
    }

    #[test]
    fn account_index_maps_operator_to_account() {
        let s = staking(json!({
            "params": {"max_validators": 5},
            "validators": [validator("valoper_a", "10", "BOND_STATUS_BONDED")]
        }));
        let index = account_index(&select_validators(&s, &to_account).unwrap());
        assert_eq!(index.get("valoper_a").map(String::as_str), Some("_a"));
    }
}
