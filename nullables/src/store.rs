//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use govtally_store::{AttributionStore, StoreError};
use govtally_types::{AttributionResult, AttributionSet, SnapshotMeta};

#[derive(Default)]
struct Snapshot {
    results: BTreeMap<String, AttributionResult>,
    meta: Option<SnapshotMeta>,
}

/// An in-memory attribution store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
#[derive(Default)]
pub struct NullAttributionStore {
    snapshot: Mutex<Snapshot>,
    failing: AtomicBool,
}

impl NullAttributionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `results` under `meta`.
    pub fn with_snapshot(results: AttributionSet, meta: SnapshotMeta) -> Self {
        Self {
            snapshot: Mutex::new(Snapshot {
                results,
                meta: Some(meta),
            }),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call return a backend error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("null store set to fail".to_string()));
        }
        self.snapshot
            .lock()
            .map_err(|_| StoreError::Backend("null store lock poisoned".to_string()))
    }
}

impl AttributionStore for NullAttributionStore {
    fn replace_all(&self, results: &AttributionSet, meta: &SnapshotMeta) -> Result<(), StoreError> {
        let mut snapshot = self.lock()?;
        snapshot.results = results.clone();
        snapshot.meta = Some(meta.clone());
        Ok(())
    }

    fn get_attribution(&self, address: &str) -> Result<Option<AttributionResult>, StoreError> {
        Ok(self.lock()?.results.get(address).cloned())
    }

    fn snapshot_meta(&self) -> Result<Option<SnapshotMeta>, StoreError> {
        Ok(self.lock()?.meta.clone())
    }

    fn attribution_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.results.len() as u64)
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock()? = Snapshot::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govtally_types::{ProposalId, VotedBy};
    use rust_decimal_macros::dec;

    fn meta() -> SnapshotMeta {
        SnapshotMeta {
            proposal_id: ProposalId::new("848"),
            source: "test".to_string(),
            entries: 1,
            built_at: 0,
        }
    }

    fn results() -> AttributionSet {
        let r = AttributionResult {
            voter: "cosmos1a".to_string(),
            shares: dec!(2),
            vote_yes: dec!(2),
            vote_no: dec!(0),
            vote_no_with_veto: dec!(0),
            vote_abstain: dec!(0),
            validators: vec![],
            voted_by: VotedBy::Delegated,
        };
        AttributionSet::from([("cosmos1a".to_string(), r)])
    }

    #[test]
    fn replace_and_clear() {
        let store = NullAttributionStore::new();
        assert_eq!(store.snapshot_meta().unwrap(), None);

        store.replace_all(&results(), &meta()).unwrap();
        assert_eq!(store.attribution_count().unwrap(), 1);
        assert_eq!(store.get_attribution("cosmos1a").unwrap().unwrap().shares, dec!(2));
        assert_eq!(store.get_attribution("cosmos1b").unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.attribution_count().unwrap(), 0);
        assert_eq!(store.snapshot_meta().unwrap(), None);
    }

    #[test]
    fn failing_store_errors() {
        let store = NullAttributionStore::with_snapshot(results(), meta());
        store.set_failing(true);
        assert!(matches!(
            store.get_attribution("cosmos1a"),
            Err(StoreError::Backend(_))
        ));
        store.set_failing(false);
        assert!(store.get_attribution("cosmos1a").unwrap().is_some());
    }
}
