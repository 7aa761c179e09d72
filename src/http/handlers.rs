//! Request handlers.
//!
//! # Responsibilities
//! - Drive the parse → validate → save pipeline for submissions
//! - Drive the fetch → (optional) render pipeline for reads
//! - Translate core results into response bodies and status codes

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::store::HistoryEntry;
use crate::template::TemplateContext;
use crate::validation::parse;

use super::error::ApiError;
use super::server::AppState;

/// API index, mirroring the service's route table.
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "Configuration Management Service",
        "endpoints": {
            "POST /config/{service}": "Create new configuration",
            "GET /config/{service}": "Get configuration (latest or specific version)",
            "GET /config/{service}/history": "Get configuration history",
            "GET /health": "Service health"
        },
        "parameters": {
            "version": "Specific version number (optional)",
            "template": "Set to 1 to enable template rendering (optional)"
        }
    }))
}

/// POST /config/{service}: validate a YAML submission and persist it as the
/// next version.
pub async fn create_configuration(
    State(state): State<AppState>,
    Path(service): Path<String>,
    body: String,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("Empty request body".to_string()));
    }

    let mut document =
        parse(&body).map_err(|err| ApiError::Validation(vec![err.to_string()]))?;

    // Unversioned submissions get the next version up front, so the version
    // rule passes and the stored payload matches the record it lands in.
    if !document.contains_key("version") {
        let next = state.store.next_version(&service).await?;
        document.insert("version".to_string(), Value::from(next));
    }

    let errors = state.validator.check_document(&document);
    if !errors.is_empty() {
        tracing::warn!(service = %service, ?errors, "Validation failed");
        return Err(ApiError::Validation(errors));
    }

    let record = state.store.save(&service, document).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "service": record.service,
            "version": record.version,
            "status": "saved"
        })),
    ))
}

/// GET /config/{service}: fetch the latest or an exact version, optionally
/// rendering it with the remaining query parameters as template variables.
pub async fn get_configuration(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let version = match params.get("version") {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            ApiError::BadRequest("Invalid version parameter".to_string())
        })?),
        None => None,
    };
    let render = params.get("template").map(String::as_str) == Some("1");

    let record = state.store.get(&service, version).await?.ok_or_else(|| {
        let mut message = format!("Configuration not found for service '{service}'");
        if let Some(version) = version {
            message.push_str(&format!(" version {version}"));
        }
        ApiError::NotFound(message)
    })?;

    // Rendering is skipped when the payload clearly carries no markers.
    let payload = if render && state.renderer.has_template_syntax(&record.payload) {
        let overrides: HashMap<String, Value> = params
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), "version" | "template"))
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();

        let context = TemplateContext::with_overrides(&overrides);
        let rendered = state.renderer.render(&record.payload, &context)?;
        tracing::debug!(service = %service, version = record.version, "Template rendered");
        rendered
    } else {
        record.payload
    };

    Ok(Json(Value::Object(payload)))
}

/// GET /config/{service}/history: all versions, newest first.
pub async fn get_history(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let history = state.store.history(&service).await?;

    if history.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No configuration history found for service '{service}'"
        )));
    }

    Ok(Json(history))
}

/// GET /health: backend liveness probe.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "service": "config-service"
            })),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected",
                    "service": "config-service",
                    "error": err.to_string()
                })),
            )
        }
    }
}
