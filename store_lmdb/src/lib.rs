//! LMDB storage backend for attribution snapshots.
//!
//! Implements the storage traits from `govtally-store` using the `heed` LMDB
//! bindings. Results and bookkeeping live in two named databases within a
//! single environment.

pub mod attribution;
pub mod environment;
pub mod error;
pub mod integrity;
pub mod meta;
pub mod migration;
pub mod write_batch;

pub use attribution::LmdbAttributionStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_integrity, IntegrityReport};
pub use meta::LmdbMetaStore;
pub use write_batch::WriteBatch;
