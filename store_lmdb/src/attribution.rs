//! LMDB implementation of AttributionStore.

use std::sync::Arc;

use heed::Env;
use tracing::{debug, info};

use govtally_store::{AttributionStore, StoreError, SNAPSHOT_META_KEY};
use govtally_types::{AttributionResult, AttributionSet, SnapshotMeta};

use crate::environment::Databases;
use crate::write_batch::WriteBatch;
use crate::LmdbError;

pub struct LmdbAttributionStore {
    pub(crate) env: Arc<Env>,
    pub(crate) dbs: Databases,
}

impl AttributionStore for LmdbAttributionStore {
    fn replace_all(&self, results: &AttributionSet, meta: &SnapshotMeta) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new(&self.env, self.dbs)?;
        batch.clear()?;
        for (address, result) in results {
            batch.put_attribution(address, result)?;
        }
        batch.put_snapshot_meta(meta)?;
        let written = batch.written();
        batch.commit()?;
        info!(
            entries = written,
            proposal = %meta.proposal_id,
            "attribution snapshot stored"
        );
        Ok(())
    }

    fn get_attribution(&self, address: &str) -> Result<Option<AttributionResult>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let Some(bytes) = self
            .dbs
            .attributions
            .get(&rtxn, address.as_bytes())
            .map_err(LmdbError::from)?
        else {
            debug!(address, "no attribution stored");
            return Ok(None);
        };
        let result = serde_json::from_slice(bytes).map_err(LmdbError::from)?;
        Ok(Some(result))
    }

    fn snapshot_meta(&self) -> Result<Option<SnapshotMeta>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .dbs
            .meta
            .get(&rtxn, SNAPSHOT_META_KEY.as_bytes())
            .map_err(LmdbError::from)?;
        match bytes {
            Some(b) => Ok(Some(serde_json::from_slice(b).map_err(LmdbError::from)?)),
            None => Ok(None),
        }
    }

    fn attribution_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.dbs.attributions.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new(&self.env, self.dbs)?;
        batch.clear()?;
        batch.commit()?;
        info!("attribution snapshot cleared");
        Ok(())
    }
}
