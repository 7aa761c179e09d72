//! PostgreSQL backend.
//!
//! # Responsibilities
//! - Connection pool setup (size range, connection probing)
//! - Schema bootstrap (table + unique version index)
//! - Row-level queries for insert, fetch, history, and liveness
//!
//! # Design Decisions
//! - The unique index on (service, version) turns the concurrent
//!   version-assignment race into a reported conflict instead of silent
//!   duplicate rows
//! - Timestamps are assigned by the database, not the application

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::config::DatabaseSettings;
use crate::validation::Document;

use super::backend::{ConfigBackend, StoreError, StoreResult};
use super::records::{ConfigRecord, HistoryEntry};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS configurations (
    id         BIGSERIAL PRIMARY KEY,
    service    TEXT        NOT NULL,
    version    BIGINT      NOT NULL,
    payload    JSONB       NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_VERSION_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS configurations_service_version_idx
    ON configurations (service, version)
"#;

/// Store backend over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    /// Connect a pool using the configured size range and probe connections
    /// before handing them out.
    pub async fn connect(settings: &DatabaseSettings) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(settings.pool_min)
            .max_connections(settings.pool_max)
            .test_before_acquire(true)
            .connect(&settings.url())
            .await?;

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            database = %settings.name,
            "Database connection pool created"
        );

        Ok(Self { pool })
    }

    /// Create the configurations table and version index if absent.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_VERSION_INDEX).execute(&self.pool).await?;
        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Drain the pool on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}

#[async_trait]
impl ConfigBackend for PgBackend {
    async fn insert(
        &self,
        service: &str,
        version: i64,
        payload: &Document,
    ) -> StoreResult<(i64, DateTime<Utc>)> {
        let row = sqlx::query(
            "INSERT INTO configurations (service, version, payload) \
             VALUES ($1, $2, $3) RETURNING id, created_at",
        )
        .bind(service)
        .bind(version)
        .bind(Json(payload))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::VersionConflict {
                service: service.to_string(),
                version,
            },
            _ => StoreError::Database(e),
        })?;

        Ok((row.try_get("id")?, row.try_get("created_at")?))
    }

    async fn max_version(&self, service: &str) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COALESCE(MAX(version), 0) AS version FROM configurations WHERE service = $1")
            .bind(service)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("version")?)
    }

    async fn fetch(
        &self,
        service: &str,
        version: Option<i64>,
    ) -> StoreResult<Option<ConfigRecord>> {
        let row = match version {
            None => {
                sqlx::query(
                    "SELECT id, service, version, payload, created_at FROM configurations \
                     WHERE service = $1 ORDER BY version DESC LIMIT 1",
                )
                .bind(service)
                .fetch_optional(&self.pool)
                .await?
            }
            Some(version) => {
                sqlx::query(
                    "SELECT id, service, version, payload, created_at FROM configurations \
                     WHERE service = $1 AND version = $2",
                )
                .bind(service)
                .bind(version)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        let Some(row) = row else {
            return Ok(None);
        };

        let Json(payload): Json<Document> = row.try_get("payload")?;
        Ok(Some(ConfigRecord {
            id: row.try_get("id")?,
            service: row.try_get("service")?,
            version: row.try_get("version")?,
            payload,
            created_at: row.try_get("created_at")?,
        }))
    }

    async fn history(&self, service: &str) -> StoreResult<Vec<HistoryEntry>> {
        let rows = sqlx::query(
            "SELECT version, created_at FROM configurations \
             WHERE service = $1 ORDER BY version DESC",
        )
        .bind(service)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(HistoryEntry {
                    version: row.try_get("version")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
