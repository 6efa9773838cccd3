//! Building and refreshing the stored attribution snapshot.

use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use tracing::info;

use govtally_genesis::load_genesis;
use govtally_governance::{TallyConfig, TallyEngine};
use govtally_store::{AttributionStore, StoreError};
use govtally_types::{AddressConverter, ProposalId, SnapshotMeta};
use govtally_utils::format_elapsed;

/// Load the genesis export, attribute every delegator's vote on `proposal_id`
/// and replace the stored snapshot with the results.
///
/// The store is only written once the whole run has succeeded.
pub fn build_snapshot<C, S>(
    genesis_path: &Path,
    proposal_id: ProposalId,
    converter: C,
    store: &S,
) -> anyhow::Result<SnapshotMeta>
where
    C: AddressConverter + Sync,
    S: AttributionStore + ?Sized,
{
    let started = Instant::now();
    let genesis = load_genesis(genesis_path)?;
    let engine = TallyEngine::new(TallyConfig::new(proposal_id), converter);
    let results = engine
        .run(&genesis)
        .with_context(|| format!("attribution over {} failed", genesis_path.display()))?;

    let meta = SnapshotMeta {
        proposal_id: engine.config().proposal_id.clone(),
        source: genesis_path.display().to_string(),
        entries: results.len() as u64,
        built_at: unix_now(),
    };
    store
        .replace_all(&results, &meta)
        .context("storing attribution snapshot")?;

    info!(
        proposal = %meta.proposal_id,
        entries = meta.entries,
        elapsed = %format_elapsed(started.elapsed()),
        "snapshot built"
    );
    Ok(meta)
}

/// Whether the stored snapshot must be rebuilt before serving.
pub fn needs_rebuild<S>(store: &S, proposal_id: &ProposalId, force: bool) -> Result<bool, StoreError>
where
    S: AttributionStore + ?Sized,
{
    if force {
        info!("rebuild requested");
        return Ok(true);
    }
    match store.snapshot_meta()? {
        None => {
            info!("no snapshot stored");
            Ok(true)
        }
        Some(meta) if meta.proposal_id != *proposal_id => {
            info!(
                stored = %meta.proposal_id,
                wanted = %proposal_id,
                "stored snapshot is for another proposal"
            );
            Ok(true)
        }
        Some(meta) => {
            info!(
                proposal = %meta.proposal_id,
                entries = meta.entries,
                built_at = meta.built_at,
                "using stored snapshot"
            );
            Ok(false)
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use govtally_nullables::NullAttributionStore;
    use govtally_types::VotedBy;
    use std::io::Write;

    const GENESIS: &str = r#"{
        "app_state": {
            "staking": {
                "params": {"max_validators": 175},
                "validators": [
                    {"operator_address": "cosmosvaloper1val", "tokens": "1000", "status": "BOND_STATUS_BONDED"}
                ],
                "delegations": [
                    {"delegator_address": "cosmos1del", "validator_address": "cosmosvaloper1val", "shares": "10"},
                    {"delegator_address": "cosmos1own", "validator_address": "cosmosvaloper1val", "shares": "4"}
                ]
            },
            "gov": {
                "votes": [
                    {"proposal_id": "848", "voter": "cosmos1val",
                     "options": [{"option": "VOTE_OPTION_YES", "weight": "1.000000000000000000"}]},
                    {"proposal_id": "848", "voter": "cosmos1own",
                     "options": [{"option": "VOTE_OPTION_NO", "weight": "1.000000000000000000"}]}
                ]
            }
        }
    }"#;

    fn genesis_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn strip_valoper(op: &str) -> String {
        op.replace("valoper", "")
    }

    #[test]
    fn build_stores_every_delegator() {
        let file = genesis_file(GENESIS);
        let store = NullAttributionStore::new();
        let meta =
            build_snapshot(file.path(), ProposalId::new("848"), strip_valoper, &store).unwrap();

        assert_eq!(meta.entries, 2);
        assert_eq!(store.snapshot_meta().unwrap(), Some(meta));
        let del = store.get_attribution("cosmos1del").unwrap().unwrap();
        assert_eq!(del.voted_by, VotedBy::Delegated);
        assert_eq!(del.vote_yes, del.shares);
        let own = store.get_attribution("cosmos1own").unwrap().unwrap();
        assert_eq!(own.voted_by, VotedBy::Direct);
        assert_eq!(own.vote_no, own.shares);
    }

    #[test]
    fn failed_build_keeps_previous_snapshot() {
        let store = NullAttributionStore::new();
        let good = genesis_file(GENESIS);
        build_snapshot(good.path(), ProposalId::new("848"), strip_valoper, &store).unwrap();

        let bad = genesis_file(r#"{"app_state": {"staking": {}}}"#);
        assert!(build_snapshot(bad.path(), ProposalId::new("848"), strip_valoper, &store).is_err());
        assert_eq!(store.attribution_count().unwrap(), 2);
    }

    #[test]
    fn rebuild_decision() {
        let store = NullAttributionStore::new();
        let p848 = ProposalId::new("848");
        assert!(needs_rebuild(&store, &p848, false).unwrap());

        let file = genesis_file(GENESIS);
        build_snapshot(file.path(), p848.clone(), strip_valoper, &store).unwrap();
        assert!(!needs_rebuild(&store, &p848, false).unwrap());
        assert!(needs_rebuild(&store, &p848, true).unwrap());
        assert!(needs_rebuild(&store, &ProposalId::new("849"), false).unwrap());
    }
}
