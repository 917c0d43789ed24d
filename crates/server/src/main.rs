//! Catalog server binary.

use anyhow::{Context, Result};
use catalog_core::config::AppConfig;
use catalog_server::{AppState, create_router};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Catalog - hierarchical product catalog API server
#[derive(Parser, Debug)]
#[command(name = "catalogd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "CATALOG_CONFIG",
        default_value = "config/catalog.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Catalog v{}", env!("CARGO_PKG_VERSION"));

    // The file is optional; CATALOG_* variables override it and defaults fill the rest.
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::info!(config_path = %args.config, "No config file found, using defaults and environment");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("CATALOG_").split("__"))
        .extract()
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    catalog_server::metrics::register_metrics();
    tracing::info!("Prometheus metrics registered");

    let metadata = catalog_metadata::from_config(&config.metadata)
        .await
        .context("failed to initialize metadata store")?;
    metadata
        .health_check()
        .await
        .context("metadata store health check failed")?;

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    let state = AppState::new(config, metadata);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
