//! Versioned Configuration Service Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;
pub mod template;
pub mod validation;

pub use config::Settings;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use store::ConfigStore;
