//! Shared utilities for the govtally workspace.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat, LoggingError};
pub use time::{format_duration, format_elapsed};
