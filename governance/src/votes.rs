//! Ballots cast on the proposal of interest.

use std::collections::HashMap;
use std::str::FromStr;

use govtally_genesis::{get_array, get_object, get_object_array, get_str, Object};
use govtally_types::{Decimal, ProposalId, VoteOption, VoteRecord};
use tracing::{debug, info, trace};

use crate::error::{Stage, TallyError};

const STAGE: Stage = Stage::VoteExtraction;

/// Collect every ballot in `app_state.gov.votes` cast on `proposal`.
///
/// `proposal_id` must equal the target as a string. Each option's weight is
/// assigned, not added, so a repeated option keeps its last weight, and a
/// later ballot from the same voter replaces the earlier one entirely.
/// Unknown option names are skipped after their weight has been validated.
pub fn extract_votes(
    app_state: &Object,
    proposal: &ProposalId,
) -> Result<HashMap<String, VoteRecord>, TallyError> {
    let gov = get_object(app_state, "gov").ok_or_else(|| TallyError::missing(STAGE, "gov"))?;
    let votes =
        get_object_array(gov, "votes").ok_or_else(|| TallyError::missing(STAGE, "gov.votes"))?;

    let mut records = HashMap::new();
    let mut matched = 0usize;
    for vote in votes {
        if get_str(vote, "proposal_id") != Some(proposal.as_str()) {
            continue;
        }
        matched += 1;
        let record = read_ballot(vote)?;
        trace!(voter = %record.voter, weights = ?record.weights, "ballot read");
        if records.insert(record.voter.clone(), record).is_some() {
            debug!("duplicate ballot replaced an earlier one");
        }
    }

    info!(
        proposal = %proposal,
        ballots = matched,
        voters = records.len(),
        "votes extracted"
    );
    Ok(records)
}

fn read_ballot(vote: &Object) -> Result<VoteRecord, TallyError> {
    let voter =
        get_str(vote, "voter").ok_or_else(|| TallyError::missing(STAGE, "votes[].voter"))?;
    let options =
        get_array(vote, "options").ok_or_else(|| TallyError::missing(STAGE, "votes[].options"))?;

    let mut record = VoteRecord::new(voter);
    for option in options {
        let option = option.as_object().ok_or_else(|| TallyError::InvalidShape {
            stage: STAGE,
            what: format!("vote option of {voter}"),
        })?;
        let raw = get_str(option, "weight")
            .ok_or_else(|| TallyError::missing(STAGE, "votes[].options[].weight"))?;
        let weight = Decimal::from_str(raw)
            .map_err(|_| TallyError::invalid_number(STAGE, "votes[].options[].weight", raw))?;
        if let Some(kind) = get_str(option, "option").and_then(VoteOption::from_wire) {
            record.weights.set(kind, weight);
        }
    }
    Ok(record)
}
