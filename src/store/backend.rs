//! Persistence backend abstraction and error definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::validation::Document;

use super::records::{ConfigRecord, HistoryEntry};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another writer persisted the same version first.
    #[error("version {version} already exists for service '{service}'")]
    VersionConflict { service: String, version: i64 },

    /// The backend failed or was unreachable.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Abstraction over the relational rows backing the store.
///
/// Implementations only translate between rows and records; version
/// assignment and payload bookkeeping live in [`super::ConfigStore`].
#[async_trait]
pub trait ConfigBackend: Send + Sync {
    /// Insert one configuration row. Returns the assigned id and creation
    /// timestamp. Fails with [`StoreError::VersionConflict`] when
    /// `(service, version)` already exists.
    async fn insert(
        &self,
        service: &str,
        version: i64,
        payload: &Document,
    ) -> StoreResult<(i64, DateTime<Utc>)>;

    /// Highest stored version for a service, 0 when the service is unknown.
    async fn max_version(&self, service: &str) -> StoreResult<i64>;

    /// Fetch an exact version, or the latest when `version` is `None`.
    async fn fetch(&self, service: &str, version: Option<i64>)
        -> StoreResult<Option<ConfigRecord>>;

    /// All versions for a service, newest first.
    async fn history(&self, service: &str) -> StoreResult<Vec<HistoryEntry>>;

    /// Backend liveness probe.
    async fn ping(&self) -> StoreResult<()>;
}
