//! LMDB snapshot integrity checks.
//!
//! Run before serving so a half-written or tampered snapshot is rebuilt
//! instead of answering lookups.

use govtally_store::SNAPSHOT_META_KEY;
use govtally_types::SnapshotMeta;

use crate::environment::{ATTRIBUTIONS_DB, META_DB};
use crate::{LmdbEnvironment, LmdbError};

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that the stored attributions agree with the snapshot marker.
///
/// Read failures and mismatches are recorded in the report rather than
/// causing a hard error.
pub fn check_integrity(env: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        databases_checked: 0,
        total_entries: 0,
        errors: Vec::new(),
    };

    let dbs = env.databases();
    let rtxn = env.env().read_txn()?;

    let mut attributions = None;
    for (name, db) in [(ATTRIBUTIONS_DB, dbs.attributions), (META_DB, dbs.meta)] {
        report.databases_checked += 1;
        match db.len(&rtxn) {
            Ok(count) => {
                report.total_entries += count;
                if name == ATTRIBUTIONS_DB {
                    attributions = Some(count);
                }
            }
            Err(e) => report
                .errors
                .push(format!("failed to read database '{}': {}", name, e)),
        }
    }

    let marker = match dbs.meta.get(&rtxn, SNAPSHOT_META_KEY.as_bytes()) {
        Ok(Some(bytes)) => match serde_json::from_slice::<SnapshotMeta>(bytes) {
            Ok(meta) => Some(meta),
            Err(e) => {
                report.errors.push(format!("snapshot marker is unreadable: {}", e));
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            report.errors.push(format!("failed to read snapshot marker: {}", e));
            None
        }
    };

    match (marker, attributions) {
        (Some(meta), Some(found)) if meta.entries != found => report.errors.push(format!(
            "snapshot marker records {} entries, found {}",
            meta.entries, found
        )),
        (None, Some(found)) if found > 0 => report
            .errors
            .push(format!("{} attributions stored without a snapshot marker", found)),
        _ => {}
    }

    if report.is_healthy() {
        tracing::debug!(entries = report.total_entries, "integrity check passed");
    } else {
        tracing::warn!(errors = ?report.errors, "integrity check failed");
    }
    Ok(report)
}
