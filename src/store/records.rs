//! Persisted record types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::validation::Document;

/// One immutable configuration snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigRecord {
    /// Backend-assigned row id.
    pub id: i64,

    /// Owning service, case-sensitive.
    pub service: String,

    /// Positive, unique within a service, strictly increasing across writes.
    pub version: i64,

    /// The stored document. Its `version` field matches the record version.
    pub payload: Document,

    /// Assigned by the backend at insert time, never mutated.
    pub created_at: DateTime<Utc>,
}

/// One entry of a service's version history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub version: i64,
    pub created_at: DateTime<Utc>,
}
