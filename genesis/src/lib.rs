//! Genesis export handling.
//!
//! A genesis export is one large JSON document. It is parsed once into a
//! [`serde_json::Value`] tree and then read through the accessors in
//! [`access`], which never panic on unexpected shapes.

pub mod access;
pub mod error;
pub mod loader;

pub use access::{get_array, get_number, get_object, get_object_array, get_str, Object};
pub use error::GenesisError;
pub use loader::{load_genesis, parse_genesis};
pub use serde_json::Value;
