//! RPC error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("no attribution for {0}")]
    AttributionNotFound(String),

    #[error("no attribution snapshot has been built")]
    NoSnapshot,

    #[error("store error: {0}")]
    Store(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::AttributionNotFound(_) => StatusCode::NOT_FOUND,
            RpcError::NoSnapshot => StatusCode::SERVICE_UNAVAILABLE,
            RpcError::Store(_) | RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<govtally_store::StoreError> for RpcError {
    fn from(e: govtally_store::StoreError) -> Self {
        RpcError::Store(e.to_string())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
