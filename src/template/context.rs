//! Request-scoped template context.

use std::collections::HashMap;

use serde_json::Value;

/// Variables exposed to a document template.
///
/// A fixed default set is always bound so that common references render
/// without the caller passing anything; caller-supplied values win
/// key-by-key.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    inner: tera::Context,
}

/// Placeholder bound to `user` when the caller supplies none.
pub const DEFAULT_USER: &str = "anonymous";

/// Placeholder bound to `env` when the caller supplies none.
pub const DEFAULT_ENV: &str = "development";

/// Placeholder bound to `timestamp` when the caller supplies none.
pub const DEFAULT_TIMESTAMP: &str = "";

impl TemplateContext {
    /// Build a context from caller-supplied variables layered over the
    /// defaults.
    pub fn with_overrides(overrides: &HashMap<String, Value>) -> Self {
        let mut inner = tera::Context::new();
        inner.insert("user", DEFAULT_USER);
        inner.insert("env", DEFAULT_ENV);
        inner.insert("timestamp", DEFAULT_TIMESTAMP);

        for (name, value) in overrides {
            inner.insert(name.as_str(), value);
        }

        Self { inner }
    }

    pub(crate) fn as_tera(&self) -> &tera::Context {
        &self.inner
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::with_overrides(&HashMap::new())
    }
}
