//! Metadata describing a persisted attribution snapshot.

use serde::{Deserialize, Serialize};

use crate::ProposalId;

/// Written alongside the results in the same transaction. Its presence means
/// the store holds a complete run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub proposal_id: ProposalId,
    /// Genesis file the run was computed from.
    pub source: String,
    /// Number of attribution records written.
    pub entries: u64,
    /// Unix seconds when the run was committed.
    pub built_at: u64,
}
