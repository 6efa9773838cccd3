//! govtally daemon: builds the vote attribution snapshot from a genesis
//! export and serves per-address lookups.

mod config;
mod snapshot;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use govtally_crypto::Bech32Converter;
use govtally_rpc::{RpcServer, SharedStore};
use govtally_store_lmdb::{check_integrity, LmdbEnvironment};
use govtally_types::{ProposalId, SnapshotMeta};
use govtally_utils::{init_logging, LogFormat};

use crate::config::DaemonConfig;
use crate::snapshot::{build_snapshot, needs_rebuild};

/// Named LMDB databases: attributions and meta.
const MAX_DBS: u32 = 2;

#[derive(Parser)]
#[command(name = "govtally", about = "Governance vote attribution from a genesis export")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "GOVTALLY_CONFIG")]
    config: Option<PathBuf>,

    /// Genesis export to read.
    #[arg(long, env = "GOVTALLY_GENESIS")]
    genesis: Option<PathBuf>,

    /// Proposal whose ballots are attributed.
    #[arg(long, env = "GOVTALLY_PROPOSAL_ID")]
    proposal_id: Option<String>,

    /// Data directory for snapshot storage.
    #[arg(long, env = "GOVTALLY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GOVTALLY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GOVTALLY_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Compute the attribution snapshot and store it, replacing any previous one.
    Build,
    /// Serve lookups, building the snapshot first if needed.
    Serve {
        /// Rebuild even if a snapshot for the proposal is stored.
        #[arg(long)]
        refresh: bool,

        /// Address to bind the lookup server to.
        #[arg(long, env = "GOVTALLY_RPC_BIND")]
        bind: Option<String>,

        /// Lookup server port.
        #[arg(long, env = "GOVTALLY_RPC_PORT")]
        port: Option<u16>,
    },
    /// Print the stored attribution of one address.
    Lookup {
        /// Delegator account address.
        address: String,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the file (or default) config.
    fn apply(&self, mut config: DaemonConfig) -> DaemonConfig {
        if let Some(ref genesis) = self.genesis {
            config.genesis_path = genesis.clone();
        }
        if let Some(ref id) = self.proposal_id {
            config.proposal_id = ProposalId::new(id.as_str());
        }
        if let Some(ref dir) = self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(ref level) = self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Command::Serve { ref bind, port, .. } = self.command {
            if let Some(bind) = bind {
                config.rpc_bind = bind.clone();
            }
            if let Some(port) = port {
                config.rpc_port = port;
            }
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };
    let config = cli.apply(file_config);
    init_logging(config.log_format, &config.log_level)?;
    if let Some(ref path) = cli.config {
        info!("Loaded config from {}", path.display());
    }

    let env = LmdbEnvironment::open(&config.data_dir, MAX_DBS, config.map_size)?;
    let store: SharedStore = Arc::new(env.attribution_store());

    match cli.command {
        Command::Build => {
            build(&config, Arc::clone(&store)).await?;
        }
        Command::Serve { refresh, .. } => {
            let report = check_integrity(&env)?;
            if !report.is_healthy() {
                warn!(errors = ?report.errors, "stored snapshot is inconsistent, rebuilding");
            }
            let force = refresh || !report.is_healthy();
            if needs_rebuild(store.as_ref(), &config.proposal_id, force)? {
                build(&config, Arc::clone(&store)).await?;
            }

            let server = RpcServer::new(config.rpc_bind.clone(), config.rpc_port, store);
            server.start(shutdown_signal()).await?;
            info!("govtally exited cleanly");
        }
        Command::Lookup { ref address } => match store.get_attribution(address)? {
            Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            None => anyhow::bail!("no attribution for {address}"),
        },
    }

    Ok(())
}

/// Run the CPU-bound build off the async runtime.
async fn build(config: &DaemonConfig, store: SharedStore) -> anyhow::Result<SnapshotMeta> {
    let genesis_path = config.genesis_path.clone();
    let proposal_id = config.proposal_id.clone();
    let converter = match config.account_prefix {
        Some(ref prefix) => Bech32Converter::with_account_prefix(prefix.as_str()),
        None => Bech32Converter::new(),
    };
    info!(
        genesis = %genesis_path.display(),
        proposal = %proposal_id,
        "building attribution snapshot"
    );
    tokio::task::spawn_blocking(move || {
        build_snapshot(&genesis_path, proposal_id, converter, store.as_ref())
    })
    .await?
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping lookup server");
}
