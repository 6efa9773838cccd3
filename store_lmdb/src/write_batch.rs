//! Write batching: groups store operations into a single LMDB write
//! transaction so a snapshot is replaced all at once.
//!
//! # Usage
//!
//! ```ignore
//! let mut batch = env.write_batch()?;
//! batch.clear()?;
//! batch.put_attribution(&address, &result)?;
//! batch.put_snapshot_meta(&meta)?;
//! batch.commit()?;
//! ```
//!
//! If the batch is dropped without calling [`WriteBatch::commit`], all
//! operations are rolled back (the underlying LMDB transaction is aborted).

use heed::{Env, RwTxn};

use govtally_store::SNAPSHOT_META_KEY;
use govtally_types::{AttributionResult, SnapshotMeta};

use crate::environment::Databases;
use crate::LmdbError;

/// A write batch spanning the attribution and meta databases.
pub struct WriteBatch<'a> {
    txn: RwTxn<'a>,
    dbs: Databases,
    written: u64,
}

impl<'a> WriteBatch<'a> {
    /// Begin a new write batch.
    pub(crate) fn new(env: &'a Env, dbs: Databases) -> Result<Self, LmdbError> {
        let txn = env.write_txn()?;
        Ok(Self {
            txn,
            dbs,
            written: 0,
        })
    }

    /// Remove every attribution and the snapshot marker. The schema version
    /// is kept.
    pub fn clear(&mut self) -> Result<(), LmdbError> {
        self.dbs.attributions.clear(&mut self.txn)?;
        self.dbs
            .meta
            .delete(&mut self.txn, SNAPSHOT_META_KEY.as_bytes())?;
        Ok(())
    }

    /// Put one delegator's result, JSON-encoded, under its address.
    pub fn put_attribution(
        &mut self,
        address: &str,
        result: &AttributionResult,
    ) -> Result<(), LmdbError> {
        let bytes = serde_json::to_vec(result)?;
        self.dbs
            .attributions
            .put(&mut self.txn, address.as_bytes(), &bytes)?;
        self.written += 1;
        Ok(())
    }

    /// Record the marker that makes the batch a complete snapshot.
    pub fn put_snapshot_meta(&mut self, meta: &SnapshotMeta) -> Result<(), LmdbError> {
        let bytes = serde_json::to_vec(meta)?;
        self.dbs
            .meta
            .put(&mut self.txn, SNAPSHOT_META_KEY.as_bytes(), &bytes)?;
        Ok(())
    }

    /// Number of attributions put so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Commit all batched operations atomically.
    pub fn commit(self) -> Result<(), LmdbError> {
        self.txn.commit()?;
        Ok(())
    }
}
