//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - Components are constructed once at startup and injected through
//!   `AppState`; there is no hidden process-wide state
//! - The body limit applies before the submission is read, so oversized
//!   payloads never reach the parser

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::store::ConfigStore;
use crate::template::TemplateRenderer;
use crate::validation::Validator;

use super::handlers;
use super::request_id::MakeRequestUuid;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ConfigStore,
    pub validator: Arc<Validator>,
    pub renderer: Arc<TemplateRenderer>,
}

/// HTTP server for the configuration service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given settings and state.
    pub fn new(settings: &Settings, state: AppState) -> Self {
        Self {
            router: Self::build_router(settings, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(settings: &Settings, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route(
                "/config/{service}",
                get(handlers::get_configuration).post(handlers::create_configuration),
            )
            .route("/config/{service}/history", get(handlers::get_history))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                settings.server.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(settings.server.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(CatchPanicLayer::custom(handle_panic))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Turn a handler panic into a JSON 500 instead of dropping the connection.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(error = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Internal server error: {detail}") })),
    )
        .into_response()
}
