//! Daemon configuration with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use govtally_types::ProposalId;
use govtally_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for the daemon.
///
/// Loaded from a TOML file via [`DaemonConfig::from_toml_file`]; every
/// missing key takes its default. Command-line flags override file values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Genesis export to compute the snapshot from.
    #[serde(default = "default_genesis_path")]
    pub genesis_path: PathBuf,

    /// Proposal whose ballots are attributed.
    #[serde(default = "default_proposal_id")]
    pub proposal_id: ProposalId,

    /// Human-readable prefix of account addresses. Derived from the operator
    /// address prefix when unset.
    #[serde(default)]
    pub account_prefix: Option<String>,

    /// Data directory for the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum size of the LMDB memory map in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Address the lookup server binds to.
    #[serde(default = "default_rpc_bind")]
    pub rpc_bind: String,

    /// Port the lookup server listens on.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Defaults ───────────────────────────────────────────────────────────

fn default_genesis_path() -> PathBuf {
    PathBuf::from("data/genesis.json")
}

fn default_proposal_id() -> ProposalId {
    ProposalId::new("848")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./govtally_data")
}

fn default_map_size() -> usize {
    4 * 1024 * 1024 * 1024
}

fn default_rpc_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            genesis_path: default_genesis_path(),
            proposal_id: default_proposal_id(),
            account_prefix: None,
            data_dir: default_data_dir(),
            map_size: default_map_size(),
            rpc_bind: default_rpc_bind(),
            rpc_port: default_rpc_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
