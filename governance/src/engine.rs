//! The batch pipeline: genesis document in, attribution set out.

use govtally_genesis::{get_object, Object, Value};
use govtally_types::{AddressConverter, AttributionSet, ProposalId};
use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::attribution::attribute_votes;
use crate::delegation::{filter_delegations, group_by_delegator};
use crate::error::{Stage, TallyError};
use crate::validators::{account_index, select_validators};
use crate::votes::extract_votes;

/// Run parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Proposal whose ballots are attributed.
    pub proposal_id: ProposalId,
}

impl TallyConfig {
    pub fn new(proposal_id: impl Into<ProposalId>) -> Self {
        Self {
            proposal_id: proposal_id.into(),
        }
    }
}

/// Computes one [`AttributionSet`] per genesis document.
///
/// Validator selection plus delegation grouping and vote extraction only read
/// the document, so they run in parallel; attribution waits for both.
pub struct TallyEngine<C> {
    config: TallyConfig,
    converter: C,
}

impl<C> TallyEngine<C>
where
    C: AddressConverter + Sync,
{
    pub fn new(config: TallyConfig, converter: C) -> Self {
        Self { config, converter }
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    /// Compute the attribution for every delegator of the selected validators.
    ///
    /// Any malformed input aborts the whole run.
    pub fn run(&self, genesis: &Value) -> Result<AttributionSet, TallyError> {
        let span = info_span!("tally", proposal = %self.config.proposal_id);
        let _enter = span.enter();

        let (groups, votes) = rayon::join(
            || {
                let _enter = span.enter();
                let app_state = app_state(genesis, Stage::ValidatorSelection)?;
                let staking = get_object(app_state, "staking")
                    .ok_or_else(|| TallyError::missing(Stage::ValidatorSelection, "staking"))?;
                let validators = select_validators(staking, &self.converter)?;
                let delegations = filter_delegations(staking, &account_index(&validators))?;
                group_by_delegator(delegations)
            },
            || {
                let _enter = span.enter();
                let app_state = app_state(genesis, Stage::VoteExtraction)?;
                extract_votes(app_state, &self.config.proposal_id)
            },
        );

        attribute_votes(&groups?, &votes?)
    }
}

fn app_state(genesis: &Value, stage: Stage) -> Result<&Object, TallyError> {
    genesis
        .as_object()
        .and_then(|root| get_object(root, "app_state"))
        .ok_or_else(|| TallyError::missing(stage, "app_state"))
}
