//! Tron Wallet Backend Binary
//!
//! Main entry point for the Tron wallet cache service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
#[cfg(feature = "mocks")]
use tron_wallet_backend_lib::data::tron::MockConnection;
use tron_wallet_backend_lib::{
    api::create_app,
    config::{Config, LogFormat},
    data::{
        db::SmartPool,
        tron::{AnyTronConnection, HttpConnection, TronClient, TronEndpoint},
    },
    log::initialize_logging,
    services::Services,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "tron-wallet-backend")]
#[command(about = "Tron Wallet Cache Service", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override SQLite database path (`:memory:` for a throwaway database)
    #[arg(long, env = "DB_PATH")]
    db_path: Option<String>,

    /// Override named Tron network (mainnet, shasta, nile)
    #[arg(long, env = "TRON_NETWORK")]
    tron_network: Option<String>,

    /// API key sent to the custom provider
    #[arg(long, env = "TRON_TOKEN")]
    tron_token: Option<String>,

    /// Custom Tron node URL, used only together with the token
    #[arg(long, env = "TRON_PROVIDER")]
    tron_provider: Option<String>,

    /// Override log format (json, text, auto)
    #[arg(long, env = "LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Serve canned Tron node answers instead of contacting a node
    #[cfg(feature = "mocks")]
    #[arg(long)]
    mock_tron: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    initialize_logging(config.log_format);

    info!("Starting Tron Wallet Backend");
    info!("Server will run on {}:{}", config.host, config.port);

    let pool = create_pool(&config).await?;
    let tron_client = create_tron_client(&config)?;
    let services = Services::new(pool, tron_client);

    // Start server
    let app = create_app(services);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context("Failed to bind TCP listener")?;

    info!("Server listening on http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn load_config() -> Result<Config> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => {
            debug!("No config file specified, using defaults");
            Config::default()
        }
    };

    // Apply CLI and environment overrides
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(db_path) = args.db_path {
        config.database.path = db_path;
    }
    if let Some(network) = args.tron_network {
        config.tron.network = network;
    }
    if let Some(token) = args.tron_token {
        config.tron.token = Some(token);
    }
    if let Some(provider) = args.tron_provider {
        config.tron.provider = Some(provider);
    }
    if let Some(log_format) = args.log_format {
        config.log_format = log_format;
    }
    #[cfg(feature = "mocks")]
    {
        if args.mock_tron {
            config.tron.mock_mode = true;
        }
    }

    Ok(config)
}

async fn create_pool(config: &Config) -> Result<Arc<SmartPool>> {
    let pool = SmartPool::new(&config.database)
        .await
        .context("Failed to create database pool")?;

    pool.init_schema()
        .await
        .context("Failed to create database schema")?;

    info!(path = %config.database.path, "Connected to SQLite database");
    Ok(Arc::new(pool))
}

fn create_tron_client(config: &Config) -> Result<Arc<TronClient>> {
    #[cfg(feature = "mocks")]
    {
        if config.tron.mock_mode {
            info!("Using mock Tron connection (mock_mode enabled)");

            let mock_conn = AnyTronConnection::Mock(MockConnection::new());
            let client = TronClient::new(Arc::new(mock_conn));

            return Ok(Arc::new(client));
        }
    }

    let endpoint =
        TronEndpoint::from_config(&config.tron).context("Invalid Tron node configuration")?;
    info!(url = %endpoint.url, with_api_key = endpoint.api_key.is_some(), "Using Tron node");

    let http_conn = HttpConnection::new(endpoint, config.tron.timeout_secs)
        .context("Failed to create Tron connection")?;

    let conn = AnyTronConnection::Http(http_conn);
    Ok(Arc::new(TronClient::new(Arc::new(conn))))
}
