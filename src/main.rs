//! Request-context demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ transport layer ──▶ base context ──▶ query attach ──▶ axum match
//!                   (server, addr)      (shutdown ctx)   (Queries)         │
//!                                                                          ▼
//!   Client Response                                               route recording
//!   ◀──────────────────────────────────────────── handler ◀──── (RouteContext)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use route_context::config::{load_config, validate_config, ConfigError, ServerConfig};
use route_context::lifecycle::{signals::wait_for_shutdown_signal, Shutdown};
use route_context::observability::init_logging;
use route_context::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "route-context", about = "Request-context demo server")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        server_name = %config.listener.server_name,
        pool_max_idle = config.routing.pool_max_idle,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(wait_for_shutdown_signal(shutdown.clone()));

    HttpServer::new(config, shutdown).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
