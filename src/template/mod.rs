//! Template rendering subsystem.
//!
//! # Data Flow
//! ```text
//! stored document
//!     → canonical JSON text
//!     → Tera template (variables, control blocks, conversion filters)
//!     → rendered text evaluated against the request context
//!     → re-parsed document
//! ```
//!
//! # Design Decisions
//! - Rendering is a pure transformation; the store never sees rendered output
//! - Every request gets a fresh one-shot template, there is no template cache
//!   (documents are the templates and change with every version)
//! - The syntax probe and variable extraction are best-effort helpers that
//!   degrade to a safe default instead of failing the request

pub mod context;
pub mod renderer;

pub use context::TemplateContext;
pub use renderer::{TemplateError, TemplateRenderer};
