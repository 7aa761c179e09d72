//! Schema rules for configuration documents.
//!
//! # Responsibilities
//! - Check the `version`, `database`, and `features` sections
//! - Accumulate every violation instead of stopping at the first
//!
//! # Rules
//! - `version`: required, integer >= 1
//! - `database` (optional): object with `host` (non-empty string) and
//!   `port` (integer in 1..=65535)
//! - `features` (optional): object whose values are scalars (bool, string,
//!   integer, float)
//! - Any other top-level field is permitted (open schema)

use serde_json::Value;

use super::parser::Document;

/// Check a parsed document against the schema rules.
///
/// Returns every violation as a human-readable string; an empty vec means
/// the document is valid.
pub fn schema_violations(doc: &Document) -> Vec<String> {
    let mut errors = Vec::new();

    check_version(doc, &mut errors);
    check_database(doc, &mut errors);
    check_features(doc, &mut errors);

    errors
}

fn check_version(doc: &Document, errors: &mut Vec<String>) {
    match doc.get("version") {
        None => errors.push("Missing required field: version".to_string()),
        Some(value) => {
            if !value.as_i64().is_some_and(|v| v >= 1) {
                errors.push("Field 'version' must be a positive integer".to_string());
            }
        }
    }
}

fn check_database(doc: &Document, errors: &mut Vec<String>) {
    let Some(db) = doc.get("database") else {
        return;
    };

    let Some(db) = db.as_object() else {
        errors.push("Field 'database' must be an object".to_string());
        return;
    };

    match db.get("host") {
        None => errors.push("Missing required field: database.host".to_string()),
        Some(host) => {
            if !host.as_str().is_some_and(|h| !h.is_empty()) {
                errors.push("database.host must be a non-empty string".to_string());
            }
        }
    }

    match db.get("port") {
        None => errors.push("Missing required field: database.port".to_string()),
        Some(port) => {
            if !port.as_i64().is_some_and(|p| (1..=65535).contains(&p)) {
                errors.push("database.port must be an integer between 1 and 65535".to_string());
            }
        }
    }
}

fn check_features(doc: &Document, errors: &mut Vec<String>) {
    let Some(features) = doc.get("features") else {
        return;
    };

    let Some(features) = features.as_object() else {
        errors.push("Field 'features' must be an object".to_string());
        return;
    };

    for (name, value) in features {
        match value {
            Value::Bool(_) | Value::String(_) | Value::Number(_) => {}
            _ => errors.push(format!(
                "features.{name} must be a boolean, string, or number"
            )),
        }
    }
}
