//! RPC request handlers.

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use govtally_types::{AttributionResult, SnapshotMeta};

use crate::error::RpcError;
use crate::server::SharedStore;

/// `GET /{address}`: the attributed vote of one delegator.
pub async fn get_attribution(
    State(store): State<SharedStore>,
    Path(address): Path<String>,
) -> Result<Json<AttributionResult>, RpcError> {
    match store.get_attribution(&address)? {
        Some(result) => Ok(Json(result)),
        None => {
            debug!(%address, "lookup miss");
            Err(RpcError::AttributionNotFound(address))
        }
    }
}

/// `GET /status`: the marker of the stored snapshot.
pub async fn status(State(store): State<SharedStore>) -> Result<Json<SnapshotMeta>, RpcError> {
    store.snapshot_meta()?.map(Json).ok_or(RpcError::NoSnapshot)
}
