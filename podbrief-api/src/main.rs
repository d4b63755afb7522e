//! podbrief-api - Podcast interview brief service
//!
//! Serves the JSON API consumed by the PodBrief web client and, optionally,
//! the built client itself.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use podbrief_api::services::{OpenAiClient, WebContentFetcher};
use podbrief_api::{build_router, AppState};
use podbrief_common::config::{load_config, CONFIG_PATH_ENV};
use podbrief_common::db::init_database;

/// Command-line arguments for podbrief-api
#[derive(Parser, Debug)]
#[command(name = "podbrief-api")]
#[command(about = "Podcast interview brief generation service")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file (overrides config)
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(database) = args.database {
        config.database.path = database;
    }

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting PodBrief API (podbrief-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    info!("Database: {}", config.database.path.display());
    let pool = init_database(&config.database.path)
        .await
        .context("Failed to open database")?;

    let completion = OpenAiClient::new(&config.completion)
        .context("Failed to build completion client")?;
    info!(
        advanced = %config.completion.advanced_model,
        standard = %config.completion.standard_model,
        api_key_configured = config.has_api_key(),
        "Completion client ready"
    );

    let fetcher = WebContentFetcher::new(&config.fetch).context("Failed to build content fetcher")?;

    if let Some(dir) = &config.server.static_dir {
        if dir.is_dir() {
            info!("Serving web client from {}", dir.display());
        } else {
            error!("Static directory {} does not exist", dir.display());
        }
    }

    let state = AppState::new(pool, Arc::new(completion), Arc::new(fetcher))
        .with_static_dir(config.server.static_dir.clone());
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.server.host, config.server.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
