//! Document rendering through Tera.
//!
//! # Responsibilities
//! - Evaluate a stored document's JSON serialization as a template
//! - Register the `to_json` / `from_json` conversion filters
//! - Re-parse the rendered text and reject structure-breaking substitutions
//!
//! # Design Decisions
//! - Autoescaping is off: output is configuration text, not HTML
//! - Compile and render failures land in one `Syntax` bucket, a rendered
//!   result that no longer parses lands in `Data`; the transport maps both
//!   to a client error

use std::error::Error as _;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tera::Tera;
use thiserror::Error;

use crate::validation::Document;

use super::context::TemplateContext;

const TEMPLATE_NAME: &str = "document";

/// Leading identifier of a `{{ ... }}` expression.
static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)").expect("valid pattern"));

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The document could not be compiled or evaluated as a template.
    #[error("Template rendering failed: {0}")]
    Syntax(String),

    /// Rendering succeeded but the output is no longer a configuration
    /// document.
    #[error("Invalid configuration text after template rendering: {0}")]
    Data(String),
}

/// Renderer for stored configuration documents.
///
/// Stateless; constructed once at startup and shared by handlers.
#[derive(Debug, Default, Clone)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a document against a context and re-parse the result.
    pub fn render(
        &self,
        doc: &Document,
        context: &TemplateContext,
    ) -> Result<Document, TemplateError> {
        let text = canonical_text(doc).map_err(|e| TemplateError::Syntax(e.to_string()))?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("to_json", filters::to_json);
        tera.register_filter("from_json", filters::from_json);
        tera.add_raw_template(TEMPLATE_NAME, &text)
            .map_err(|e| TemplateError::Syntax(describe(&e)))?;

        let rendered = tera
            .render(TEMPLATE_NAME, context.as_tera())
            .map_err(|e| TemplateError::Syntax(describe(&e)))?;

        let value: Value =
            serde_json::from_str(&rendered).map_err(|e| TemplateError::Data(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(TemplateError::Data(
                "rendered output is not an object".to_string(),
            )),
        }
    }

    /// Cheap textual probe for template markers in the canonical
    /// serialization. Best-effort; failures report `false`.
    pub fn has_template_syntax(&self, doc: &Document) -> bool {
        canonical_text(doc)
            .map(|text| text.contains("{{") || text.contains("{%"))
            .unwrap_or(false)
    }

    /// Names referenced by `{{ ... }}` expressions in the document.
    ///
    /// A textual approximation, not a parser-level guarantee: control-block
    /// internals are not mined, and any internal failure yields the empty
    /// set.
    pub fn extract_variables(&self, doc: &Document) -> std::collections::HashSet<String> {
        let Ok(text) = canonical_text(doc) else {
            return Default::default();
        };

        // A document that does not even compile reports nothing.
        let mut tera = Tera::default();
        if tera.add_raw_template(TEMPLATE_NAME, &text).is_err() {
            return Default::default();
        }

        VARIABLE_RE
            .captures_iter(&text)
            .map(|captures| captures[1].to_string())
            .collect()
    }
}

/// The canonical textual form a document is templated and compared in.
fn canonical_text(doc: &Document) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

/// Flatten a Tera error chain into one message; the top-level display alone
/// drops the cause.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

mod filters {
    use std::collections::HashMap;

    use serde_json::Value;

    /// Serialize any value to pretty JSON text.
    pub fn to_json(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        serde_json::to_string_pretty(value)
            .map(Value::String)
            .map_err(tera::Error::msg)
    }

    /// Parse JSON text back into a value, returning the input unchanged when
    /// it does not parse.
    pub fn from_json(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        match value.as_str() {
            Some(text) => Ok(serde_json::from_str(text).unwrap_or_else(|_| value.clone())),
            None => Ok(value.clone()),
        }
    }
}
