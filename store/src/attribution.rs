//! Attribution storage trait.

use crate::StoreError;
use govtally_types::{AttributionResult, AttributionSet, SnapshotMeta};

/// Persistent home of one attribution run, keyed by delegator address.
pub trait AttributionStore {
    /// Replace the stored run with `results` and record `meta`.
    ///
    /// All-or-nothing: previous results are cleared and every new record plus
    /// the marker is written in one transaction. On error nothing changes.
    fn replace_all(&self, results: &AttributionSet, meta: &SnapshotMeta) -> Result<(), StoreError>;

    /// The result stored for `address`, `None` if the address has none.
    fn get_attribution(&self, address: &str) -> Result<Option<AttributionResult>, StoreError>;

    /// Marker of the stored run, `None` if no complete run has been stored.
    fn snapshot_meta(&self) -> Result<Option<SnapshotMeta>, StoreError>;

    /// Number of stored results.
    fn attribution_count(&self) -> Result<u64, StoreError>;

    /// Remove every result and the marker.
    fn clear(&self) -> Result<(), StoreError>;
}
