//! Nullable infrastructure for deterministic testing.
//!
//! Storage is abstracted behind the `govtally-store` traits. This crate
//! provides a test-friendly implementation that keeps everything in memory,
//! never touches the filesystem and can be told to fail on demand.
//!
//! Usage: swap the LMDB store for a nullable in tests.

pub mod store;

pub use store::NullAttributionStore;
