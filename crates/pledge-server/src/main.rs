//! Pledge server binary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pledge_server::{run_server, AppState, ServerConfig};
use pledge_storage::RedbInvestorStore;
use pledge_traits::InvestorStore;

const DEFAULT_CONFIG_PATH: &str = "config/pledge.toml";

/// Pledge investor commitments REST API server
#[derive(Parser, Debug)]
#[command(name = "pledge-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Path of the redb database file
    #[arg(short, long)]
    storage: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let fallback = if args.verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Pledge server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::from_file(path)
                .with_context(|| format!("reading {}", path.display()))?
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            ServerConfig::from_file(DEFAULT_CONFIG_PATH)
                .with_context(|| format!("reading {DEFAULT_CONFIG_PATH}"))?
        }
        None => {
            info!("Using default configuration");
            ServerConfig::default()
        }
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(storage) = args.storage {
        config.storage_path = storage;
    }

    // Create storage
    let store: Arc<dyn InvestorStore> = Arc::new(
        RedbInvestorStore::open(&config.storage_path)
            .with_context(|| format!("opening store at {}", config.storage_path))?,
    );
    info!(
        "Opened {} store at {} ({} investors)",
        store.backend_name(),
        config.storage_path,
        store.count().await?
    );

    let host = config.host.clone();
    let port = config.port;
    let state = AppState::new(Arc::clone(&store), config).context("invalid fx_rates")?;

    run_server(state, &host, port).await?;

    drop(store);
    info!("Storage released");

    Ok(())
}
