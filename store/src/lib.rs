//! Abstract storage traits for attribution snapshots.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The daemon and the lookup server depend only on the traits.

pub mod attribution;
pub mod error;
pub mod meta;

pub use attribution::AttributionStore;
pub use error::StoreError;
pub use meta::MetaStore;

/// Meta key under which the [`govtally_types::SnapshotMeta`] marker is stored.
pub const SNAPSHOT_META_KEY: &str = "snapshot";
