//! sigchain Server
//!
//! Secure signature creation service: issues per-device key pairs and
//! produces a strictly-ordered, tamper-evident chain of signed
//! transactions per device.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (0.0.0.0:8080)
//! sigchain-server
//!
//! # Start with custom config
//! sigchain-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! SIGCHAIN__SERVER__PORT=9090 sigchain-server
//! ```

mod config;

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sigchain_api::{create_router, ApiConfig, AppState};
use sigchain_crypto::AlgorithmRegistry;
use sigchain_manager::DeviceManager;
use sigchain_store::MemoryStore;

use crate::config::ServerConfig;

/// sigchain server - secure signature creation service
#[derive(Parser, Debug)]
#[command(name = "sigchain-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, env = "SIGCHAIN_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "SIGCHAIN_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SIGCHAIN_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SIGCHAIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "SIGCHAIN_LOG_FORMAT")]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut server_config = ServerConfig::load(args.config.as_deref())?;

    // CLI arguments win over file and environment
    if let Some(host) = args.host {
        server_config.server.host = host;
    }
    if let Some(port) = args.port {
        server_config.server.port = port;
    }
    if let Some(level) = args.log_level {
        server_config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        server_config.logging.format = format;
    }

    init_logging(&server_config.logging);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting sigchain server"
    );

    // In-memory reference store; a database-backed DeviceStore would be
    // wired in here instead.
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(AlgorithmRegistry::with_defaults());
    tracing::info!(algorithms = ?registry.names(), "algorithm registry initialized");

    let manager = Arc::new(DeviceManager::new(store, registry));
    let state = Arc::new(AppState::new(manager));

    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        enable_tracing: server_config.api.enable_tracing,
    };
    let app = create_router(state, api_config);

    let addr = server_config.server.socket_addr()?;
    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber.with(fmt::layer().json().with_target(true)).init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }
}

/// Resolve when the process receives ctrl-c or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
