//! Versioned configuration store subsystem.
//!
//! # Data Flow
//! ```text
//! save:  document → version assignment (max + 1 when absent)
//!            → backend insert (unique on service + version)
//!            → ConfigRecord
//! read:  service [+ version] → backend fetch → ConfigRecord | None
//! audit: service → backend history → [(version, created_at)] descending
//! ```
//!
//! # Design Decisions
//! - Records are immutable; a new version is always a new row
//! - Version assignment is read-then-write and therefore racy under
//!   concurrent writers; the backend's unique index is the arbiter and a
//!   collision surfaces as `StoreError::VersionConflict`
//! - Absence is a normal result (`Ok(None)` / empty history), never an error
//! - The backend sits behind a trait so the orchestration logic runs against
//!   PostgreSQL in production and an in-memory map in tests

pub mod backend;
pub mod memory;
pub mod postgres;
pub mod records;
pub mod versioned;

pub use backend::{ConfigBackend, StoreError};
pub use memory::MemoryBackend;
pub use postgres::PgBackend;
pub use records::{ConfigRecord, HistoryEntry};
pub use versioned::ConfigStore;
