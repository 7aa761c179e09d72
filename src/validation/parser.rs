//! YAML submission parsing.
//!
//! # Responsibilities
//! - Turn raw YAML text into an in-memory document tree
//! - Reject empty input, syntax errors, and non-mapping top-level values
//!
//! # Design Decisions
//! - Documents are held as JSON object trees: payloads are persisted as
//!   JSONB and rendered through their JSON serialization, so converting at
//!   the door avoids a second representation
//! - The underlying parser's message (line/context) is preserved in the
//!   error, not discarded

use serde_json::Value;
use thiserror::Error;

/// A parsed configuration document. Always object-shaped at the top level.
pub type Document = serde_json::Map<String, Value>;

/// Errors that can occur while parsing a submission.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input was empty or whitespace-only.
    #[error("Empty YAML content")]
    EmptyInput,

    /// Input was not syntactically valid YAML.
    #[error("YAML syntax error: {0}")]
    Syntax(String),

    /// Input parsed, but the top-level value was not a mapping.
    #[error("YAML must represent a dictionary/object")]
    NotAnObject,
}

/// Parse raw YAML text into a document.
///
/// Pure function of the input; no side effects.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let value: Value =
        serde_yaml::from_str(text).map_err(|e| ParseError::Syntax(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ParseError::NotAnObject),
    }
}
