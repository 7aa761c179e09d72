//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load settings → init logging → connect pool → migrate → serve
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs) → Shutdown broadcast (shutdown.rs)
//!     → server stops accepting → in-flight requests drain → pool closed
//! ```
//!
//! # Design Decisions
//! - Ordered startup: settings first, then persistence, listener last
//! - A single broadcast channel fans the shutdown signal out to every
//!   long-running task

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
