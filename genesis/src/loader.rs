//! Reading a genesis export from disk.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::GenesisError;

/// Parse an in-memory genesis export. The root must be an object.
pub fn parse_genesis(bytes: &[u8]) -> Result<Value, GenesisError> {
    let doc: Value = serde_json::from_slice(bytes)?;
    if !doc.is_object() {
        return Err(GenesisError::NotAnObject);
    }
    Ok(doc)
}

/// Read and parse the genesis export at `path`.
///
/// The whole file is read into memory first; parsing from a slice is much
/// faster than from a reader for multi-gigabyte exports.
pub fn load_genesis(path: &Path) -> Result<Value, GenesisError> {
    info!("Loading genesis from {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| GenesisError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(bytes = bytes.len(), "genesis file read");
    parse_genesis(&bytes)
}
