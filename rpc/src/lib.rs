//! HTTP lookup server for stored vote attributions.
//!
//! Provides endpoints for:
//! - One delegator's attributed vote, by address
//! - The status of the stored snapshot

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{router, RpcServer, SharedStore};
