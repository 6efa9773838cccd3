//! Axum-based lookup server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tracing::info;

use govtally_store::AttributionStore;

use crate::error::RpcError;
use crate::handlers;

/// Store handle shared by every request.
pub type SharedStore = Arc<dyn AttributionStore + Send + Sync>;

/// Build the router. The static `/status` route takes precedence over the
/// address parameter.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/status", get(handlers::status))
        .route("/:address", get(handlers::get_attribution))
        .with_state(store)
}

pub struct RpcServer {
    pub bind: String,
    pub port: u16,
    store: SharedStore,
}

impl RpcServer {
    pub fn new(bind: impl Into<String>, port: u16, store: SharedStore) -> Self {
        Self {
            bind: bind.into(),
            port,
            store,
        }
    }

    /// Serve lookups until `shutdown` resolves.
    pub async fn start<F>(&self, shutdown: F) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.bind, self.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(format!("cannot bind {addr}: {e}")))?;
        let local: SocketAddr = listener
            .local_addr()
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("lookup server listening on {}", local);

        axum::serve(listener, router(Arc::clone(&self.store)))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("lookup server stopped");
        Ok(())
    }
}
