//! Runtime settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (DB_HOST, APP_PORT, ...)
//!     → Settings (immutable)
//!     → shared with subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; there is no hot reload
//! - All fields have defaults so the service starts with no file at all
//! - Environment variables win over the file, matching container practice

pub mod loader;
pub mod schema;

pub use loader::{load, SettingsError};
pub use schema::{DatabaseSettings, ServerSettings, Settings};
