//! HTTP transport subsystem.
//!
//! # Routes
//! ```text
//! GET  /                            API index
//! POST /config/{service}            validate + persist a submission
//! GET  /config/{service}            fetch latest or ?version=N,
//!                                   ?template=1 renders with query params
//! GET  /config/{service}/history    version history, newest first
//! GET  /health                      backend liveness probe
//! ```
//!
//! # Design Decisions
//! - Handlers return typed errors; `ApiError` owns the mapping to status
//!   codes and the uniform `{"error": ...}` body
//! - The transport translates core-level absence into 404; the core itself
//!   never treats absence as a failure

pub mod error;
pub mod handlers;
pub mod request_id;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
