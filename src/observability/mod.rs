//! Observability subsystem.
//!
//! # Responsibilities
//! - Initialize the structured logging subsystem
//! - Choose a default filter when the environment does not set one
//!
//! # Design Decisions
//! - Uses the tracing crate; events carry structured fields (service,
//!   version, error) rather than formatted strings
//! - `RUST_LOG` always wins over the settings-derived default

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Call once at startup, before any subsystem logs.
pub fn init_logging(debug: bool) {
    let default_filter = if debug {
        "config_service=debug,tower_http=debug"
    } else {
        "config_service=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
