//! Settings schema definitions.
//!
//! All types derive Serde traits for deserialization from the settings file.

use serde::{Deserialize, Serialize};

/// Root settings for the configuration service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// HTTP server settings (bind address, limits).
    pub server: ServerSettings,

    /// Persistence backend settings.
    pub database: DatabaseSettings,

    /// Widen log output and error detail.
    pub debug: bool,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl ServerSettings {
    /// The address the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database host.
    pub host: String,

    /// Database port.
    pub port: u16,

    /// Database name.
    pub name: String,

    /// Role to connect as.
    pub user: String,

    /// Role password.
    pub password: String,

    /// Minimum pooled connections kept open.
    pub pool_min: u32,

    /// Maximum pooled connections.
    pub pool_max: u32,
}

impl DatabaseSettings {
    /// Connection URL for the pool.
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "config_service_db".to_string(),
            user: "config_user".to_string(),
            password: "config_password".to_string(),
            pool_min: 1,
            pool_max: 10,
        }
    }
}
