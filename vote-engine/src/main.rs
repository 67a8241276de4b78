//! Vote Engine Main Entry Point
//!
//! This is the main binary for the vote engine service. It connects to
//! PostgreSQL, wires the orchestrator and realtime transport, and stays
//! resident until interrupted.

use dotenv::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vote_engine::{Dependencies, EngineError, Settings};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vote_engine=info,vote_engine_core=info"));

    if env::var("LOG_JSON").is_ok() {
        // Structured JSON output for log aggregation
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "vote-engine",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "vote-engine",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting vote engine");

    let settings = Settings::from_env()?;

    let deps = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    info!(
        realtime_available = deps.transport.is_available(),
        "Vote engine ready"
    );

    // Stay resident until interrupted. Callers embed the orchestrator
    // behind their own transport; the binary only owns the lifecycle.
    tokio::signal::ctrl_c().await.map_err(sqlx::Error::Io)?;
    info!("Shutdown signal received, closing pool");
    deps.pool.close().await;

    Ok(())
}
