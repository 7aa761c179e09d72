//! Configuration Management Service
//!
//! A versioned configuration service built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │             CONFIGURATION SERVICE              │
//!                    │                                                │
//!   POST raw YAML    │  ┌────────────┐   ┌────────────┐  ┌─────────┐ │
//!   ─────────────────┼─▶│ validation │──▶│   store    │─▶│ backend │ │
//!                    │  │ parse+rules│   │ versioning │  │  (pg)   │ │
//!                    │  └────────────┘   └─────┬──────┘  └─────────┘ │
//!                    │                         │                     │
//!   GET [?template]  │  ┌────────────┐         │                     │
//!   ◀────────────────┼──│  template  │◀────────┘                     │
//!                    │  │  renderer  │                               │
//!                    │  └────────────┘                               │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns          │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐  │ │
//!                    │  │  │ config │ │observability│ │lifecycle│  │ │
//!                    │  │  └────────┘ └─────────────┘ └─────────┘  │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use config_service::config;
use config_service::http::{AppState, HttpServer};
use config_service::lifecycle::{signals, Shutdown};
use config_service::observability;
use config_service::store::{ConfigStore, PgBackend};
use config_service::template::TemplateRenderer;
use config_service::validation::Validator;

/// Versioned configuration service.
#[derive(Debug, Parser)]
#[command(name = "config-service", version)]
struct Args {
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut settings = config::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    observability::init_logging(settings.debug);

    tracing::info!(
        bind_address = %settings.server.bind_address(),
        db_host = %settings.database.host,
        db_name = %settings.database.name,
        debug = settings.debug,
        "Settings loaded"
    );

    // Persistence first; the service is useless without it.
    let backend = Arc::new(PgBackend::connect(&settings.database).await?);
    backend.migrate().await?;

    let state = AppState {
        store: ConfigStore::new(backend.clone()),
        validator: Arc::new(Validator::new()),
        renderer: Arc::new(TemplateRenderer::new()),
    };

    let listener = TcpListener::bind(settings.server.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );
    tracing::info!("Endpoints: POST /config/{{service}}, GET /config/{{service}}[?version=N][&template=1], GET /config/{{service}}/history, GET /health");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::listen(shutdown.clone()));

    let server = HttpServer::new(&settings, state);
    server.run(listener, shutdown.subscribe()).await?;

    backend.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
