//! LMDB environment setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::info;

use crate::attribution::LmdbAttributionStore;
use crate::meta::LmdbMetaStore;
use crate::migration::Migrator;
use crate::write_batch::WriteBatch;
use crate::LmdbError;

pub(crate) const ATTRIBUTIONS_DB: &str = "attributions";
pub(crate) const META_DB: &str = "meta";

/// Handles of every named database in the environment.
#[derive(Clone, Copy)]
pub(crate) struct Databases {
    /// Delegator address -> JSON-encoded `AttributionResult`.
    pub attributions: Database<Bytes, Bytes>,
    /// Snapshot marker and schema version.
    pub meta: Database<Bytes, Bytes>,
}

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    dbs: Databases,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if missing, both databases are created on
    /// first open and pending schema migrations are applied.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        fs::create_dir_all(path).map_err(|source| LmdbError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // SAFETY: the environment is opened once per process and the data
        // directory is not shared with other writers.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let attributions = env.create_database::<Bytes, Bytes>(&mut wtxn, Some(ATTRIBUTIONS_DB))?;
        let meta = env.create_database::<Bytes, Bytes>(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;

        let environment = Self {
            env: Arc::new(env),
            dbs: Databases { attributions, meta },
            path: path.to_path_buf(),
        };
        Migrator::run(&environment.meta_store())?;
        info!(path = %path.display(), map_size, "LMDB environment opened");
        Ok(environment)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn env(&self) -> &Env {
        &self.env
    }

    pub(crate) fn databases(&self) -> Databases {
        self.dbs
    }

    /// Attribution store sharing this environment.
    pub fn attribution_store(&self) -> LmdbAttributionStore {
        LmdbAttributionStore {
            env: Arc::clone(&self.env),
            dbs: self.dbs,
        }
    }

    /// Meta store sharing this environment.
    pub fn meta_store(&self) -> LmdbMetaStore {
        LmdbMetaStore {
            env: Arc::clone(&self.env),
            meta_db: self.dbs.meta,
        }
    }

    /// Begin a write batch spanning both databases.
    pub fn write_batch(&self) -> Result<WriteBatch<'_>, LmdbError> {
        WriteBatch::new(self.env(), self.dbs)
    }
}
