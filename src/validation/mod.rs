//! Configuration validation subsystem.
//!
//! # Data Flow
//! ```text
//! raw YAML text
//!     → parser.rs (syntax + shape checks)
//!     → rules.rs (schema checks, all violations accumulated)
//!     → ValidationOutcome (parsed document + error list)
//! ```
//!
//! # Design Decisions
//! - Parsing and schema checks are pure functions of the input
//! - Returns all validation errors, not just the first
//! - Errors are plain strings naming the violated path and rule, so the
//!   transport layer can report them verbatim

pub mod parser;
pub mod rules;

pub use parser::{parse, Document, ParseError};

/// Result of running a raw submission through the full validation pipeline.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// True when parsing succeeded and no schema rule was violated.
    pub valid: bool,

    /// The parsed document. `None` only when parsing itself failed; schema
    /// violations still carry the document so callers can inspect it.
    pub document: Option<Document>,

    /// Human-readable violations, in rule order.
    pub errors: Vec<String>,
}

/// Validator for raw configuration submissions.
///
/// Stateless; constructed once at startup and shared by handlers.
#[derive(Debug, Default, Clone)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Parse and schema-check a raw YAML submission.
    pub fn evaluate(&self, text: &str) -> ValidationOutcome {
        let document = match parser::parse(text) {
            Ok(doc) => doc,
            Err(err) => {
                return ValidationOutcome {
                    valid: false,
                    document: None,
                    errors: vec![err.to_string()],
                };
            }
        };

        let errors = self.check_document(&document);
        ValidationOutcome {
            valid: errors.is_empty(),
            document: Some(document),
            errors,
        }
    }

    /// Schema-check an already-parsed document.
    pub fn check_document(&self, document: &Document) -> Vec<String> {
        rules::schema_violations(document)
    }
}
