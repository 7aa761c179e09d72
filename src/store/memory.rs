//! In-memory backend.
//!
//! Backs the integration tests and doubles as an ephemeral backend for local
//! development. Enforces the same (service, version) uniqueness as the
//! PostgreSQL index so conflict behavior matches production.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::validation::Document;

use super::backend::{ConfigBackend, StoreError, StoreResult};
use super::records::{ConfigRecord, HistoryEntry};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: Vec<ConfigRecord>,
}

/// Store backend over a mutex-guarded vec of records.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigBackend for MemoryBackend {
    async fn insert(
        &self,
        service: &str,
        version: i64,
        payload: &Document,
    ) -> StoreResult<(i64, DateTime<Utc>)> {
        let mut inner = self.inner.lock().await;

        if inner
            .rows
            .iter()
            .any(|r| r.service == service && r.version == version)
        {
            return Err(StoreError::VersionConflict {
                service: service.to_string(),
                version,
            });
        }

        inner.next_id += 1;
        let record = ConfigRecord {
            id: inner.next_id,
            service: service.to_string(),
            version,
            payload: payload.clone(),
            created_at: Utc::now(),
        };
        let assigned = (record.id, record.created_at);
        inner.rows.push(record);
        Ok(assigned)
    }

    async fn max_version(&self, service: &str) -> StoreResult<i64> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .iter()
            .filter(|r| r.service == service)
            .map(|r| r.version)
            .max()
            .unwrap_or(0))
    }

    async fn fetch(
        &self,
        service: &str,
        version: Option<i64>,
    ) -> StoreResult<Option<ConfigRecord>> {
        let inner = self.inner.lock().await;
        let mut matching = inner.rows.iter().filter(|r| r.service == service);

        let found = match version {
            Some(version) => matching.find(|r| r.version == version),
            None => matching.max_by_key(|r| r.version),
        };

        Ok(found.cloned())
    }

    async fn history(&self, service: &str) -> StoreResult<Vec<HistoryEntry>> {
        let inner = self.inner.lock().await;
        let mut entries: Vec<HistoryEntry> = inner
            .rows
            .iter()
            .filter(|r| r.service == service)
            .map(|r| HistoryEntry {
                version: r.version,
                created_at: r.created_at,
            })
            .collect();

        entries.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(entries)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
