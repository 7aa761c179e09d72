//! Shared utilities for integration testing.

use std::sync::Arc;

use tokio::net::TcpListener;

use config_service::http::{AppState, HttpServer};
use config_service::lifecycle::Shutdown;
use config_service::store::{ConfigStore, MemoryBackend};
use config_service::template::TemplateRenderer;
use config_service::validation::Validator;
use config_service::Settings;

/// Start the full service on an ephemeral port over an in-memory backend.
///
/// The listener is bound before the server task is spawned, so requests can
/// be issued immediately. Returns the base URL and the shutdown handle.
pub async fn start_test_app() -> (String, Shutdown) {
    let settings = Settings::default();

    let state = AppState {
        store: ConfigStore::new(Arc::new(MemoryBackend::new())),
        validator: Arc::new(Validator::new()),
        renderer: Arc::new(TemplateRenderer::new()),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(&settings, state);

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (format!("http://{addr}"), shutdown)
}
