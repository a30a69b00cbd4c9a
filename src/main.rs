//! User Service (v1)
//!
//! A small HTTP/JSON service over the `users` table, built with Tokio, Axum
//! and sqlx.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────────────┐
//!                    │                     USER SERVICE                      │
//!                    │                                                       │
//!   Client Request   │  ┌──────────┐    ┌───────────────┐    ┌────────────┐  │
//!   ─────────────────┼─▶│   http   │───▶│  http::users  │───▶│   store    │──┼──▶ MySQL
//!                    │  │  server  │    │ route handler │    │ (UserStore)│  │   (pool)
//!                    │  └──────────┘    └───────────────┘    └────────────┘  │
//!   Client Response  │        ▲                 │                            │
//!   ◀────────────────┼────────┴─── response ◀───┘                            │
//!                    │                                                       │
//!                    │  ┌─────────────────────────────────────────────────┐  │
//!                    │  │             Cross-Cutting Concerns              │  │
//!                    │  │  ┌────────┐ ┌───────────────┐ ┌──────────────┐  │  │
//!                    │  │  │ config │ │ observability │ │  lifecycle   │  │  │
//!                    │  │  └────────┘ └───────────────┘ └──────────────┘  │  │
//!                    │  └─────────────────────────────────────────────────┘  │
//!                    └───────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use user_service::config::{self, DatabaseBackend};
use user_service::lifecycle::{self, Shutdown};
use user_service::observability::logging;

#[derive(Parser)]
#[command(name = "user-service", version)]
#[command(about = "HTTP/JSON service over the users table", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "USER_SERVICE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before clap so USER_SERVICE_CONFIG can come from it.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) => tracing::debug!(error = %e, "No .env loaded"),
    }

    tracing::info!("user-service v{} starting", env!("CARGO_PKG_VERSION"));

    let db = &config.database;
    let database_host = match db.backend {
        DatabaseBackend::MySql => db.host.as_str(),
        DatabaseBackend::Memory => "-",
    };
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        database_backend = ?db.backend,
        database_host = %database_host,
        database_name = %db.name,
        max_connections = db.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        query_timeout_secs = config.timeouts.query_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    lifecycle::start(config, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
