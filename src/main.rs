//! Private Repository Data Proxy
//!
//! Relays files from a private GitHub repository, authenticating with a
//! server-held token.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 DATA PROXY                   │
//!   GET /api/data/a/b    │  ┌────────┐   ┌─────────┐   ┌────────────┐   │
//!   ─────────────────────┼─▶│ server │──▶│ handler │──▶│  upstream  │───┼──▶ GitHub
//!                        │  └────────┘   └────┬────┘   │   client   │   │    contents API
//!                        │                    │        └────────────┘   │
//!   200 + Cache-Control  │              ┌─────▼─────┐                   │
//!   ◀────────────────────┼──────────────│  content  │                   │
//!                        │              │ JSON/text │                   │
//!                        │              └───────────┘                   │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use data_proxy::config::{load_config, ProxyConfig};
use data_proxy::observability::init_logging;
use data_proxy::{Credential, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "data-proxy")]
#[command(about = "Serve files from a private GitHub repository", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    init_logging(&config.observability);

    tracing::info!("data-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base = %config.upstream.api_base,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let credential = Credential::from_env(&config.upstream.token_env);
    if credential.is_none() {
        tracing::warn!(
            token_env = %config.upstream.token_env,
            "Upstream token not set; data requests will fail with a configuration error"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, credential)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
