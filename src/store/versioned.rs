//! Version assignment and record orchestration.
//!
//! # Responsibilities
//! - Assign the next version when a submission carries none
//! - Keep the payload's `version` field consistent with the record version
//! - Delegate row access to the configured backend

use std::sync::Arc;

use serde_json::Value;

use crate::validation::Document;

use super::backend::{ConfigBackend, StoreResult};
use super::records::{ConfigRecord, HistoryEntry};

/// Versioned configuration store over an opaque backend.
#[derive(Clone)]
pub struct ConfigStore {
    backend: Arc<dyn ConfigBackend>,
}

impl ConfigStore {
    pub fn new(backend: Arc<dyn ConfigBackend>) -> Self {
        Self { backend }
    }

    /// Persist a new configuration for a service.
    ///
    /// A payload carrying an integer `version` is trusted as-is; otherwise
    /// the next version for the service is assigned and written into the
    /// payload before it is persisted.
    pub async fn save(&self, service: &str, mut doc: Document) -> StoreResult<ConfigRecord> {
        let version = match doc.get("version").and_then(Value::as_i64) {
            Some(version) => version,
            None => {
                let next = self.next_version(service).await?;
                doc.insert("version".to_string(), Value::from(next));
                next
            }
        };

        let (id, created_at) = self.backend.insert(service, version, &doc).await?;

        tracing::info!(service = %service, version, "Configuration saved");

        Ok(ConfigRecord {
            id,
            service: service.to_string(),
            version,
            payload: doc,
            created_at,
        })
    }

    /// The version the next unversioned save for this service would get.
    pub async fn next_version(&self, service: &str) -> StoreResult<i64> {
        Ok(self.backend.max_version(service).await? + 1)
    }

    /// Fetch an exact version, or the latest when `version` is `None`.
    /// Absence is a normal result, not an error.
    pub async fn get(
        &self,
        service: &str,
        version: Option<i64>,
    ) -> StoreResult<Option<ConfigRecord>> {
        self.backend.fetch(service, version).await
    }

    /// Version history for a service, newest first. Empty for unknown
    /// services.
    pub async fn history(&self, service: &str) -> StoreResult<Vec<HistoryEntry>> {
        self.backend.history(service).await
    }

    /// Backend liveness probe.
    pub async fn ping(&self) -> StoreResult<()> {
        self.backend.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::StoreError;
    use crate::store::memory::MemoryBackend;
    use serde_json::json;

    fn store() -> ConfigStore {
        ConfigStore::new(Arc::new(MemoryBackend::new()))
    }

    fn doc(value: Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_sequential_saves_assign_increasing_versions() {
        let store = store();

        for expected in 1..=3 {
            let record = store
                .save("auth", doc(json!({"database": {"host": "localhost", "port": 5432}})))
                .await
                .unwrap();
            assert_eq!(record.version, expected);
            assert_eq!(record.payload["version"], expected);
        }
    }

    #[tokio::test]
    async fn test_explicit_version_is_trusted() {
        let store = store();

        let record = store
            .save("auth", doc(json!({"version": 7, "key": "value"})))
            .await
            .unwrap();
        assert_eq!(record.version, 7);

        // The next unversioned save continues from the maximum.
        let record = store.save("auth", doc(json!({"key": "value"}))).await.unwrap();
        assert_eq!(record.version, 8);
    }

    #[tokio::test]
    async fn test_duplicate_explicit_version_conflicts() {
        let store = store();

        store.save("auth", doc(json!({"version": 1}))).await.unwrap();
        let err = store.save("auth", doc(json!({"version": 1}))).await.unwrap_err();

        assert!(matches!(
            err,
            StoreError::VersionConflict { version: 1, .. }
        ));
    }

    #[tokio::test]
    async fn test_get_latest_and_exact() {
        let store = store();
        store.save("auth", doc(json!({"a": 1}))).await.unwrap();
        store.save("auth", doc(json!({"a": 2}))).await.unwrap();

        let latest = store.get("auth", None).await.unwrap().unwrap();
        assert_eq!(latest.version, 2);
        assert_eq!(latest.payload["a"], 2);

        let first = store.get("auth", Some(1)).await.unwrap().unwrap();
        assert_eq!(first.payload["a"], 1);

        assert!(store.get("auth", Some(9)).await.unwrap().is_none());
        assert!(store.get("unknown-service", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_is_descending_and_empty_for_unknown() {
        let store = store();
        for _ in 0..3 {
            store.save("auth", doc(json!({}))).await.unwrap();
        }

        let history = store.history("auth").await.unwrap();
        let versions: Vec<i64> = history.iter().map(|h| h.version).collect();
        assert_eq!(versions, vec![3, 2, 1]);

        assert!(store.history("unknown-service").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_versions_are_independent_per_service() {
        let store = store();
        store.save("auth", doc(json!({}))).await.unwrap();
        let record = store.save("billing", doc(json!({}))).await.unwrap();
        assert_eq!(record.version, 1);
    }
}
