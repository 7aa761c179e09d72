//! Failure classification at the transport boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store::StoreError;
use crate::template::TemplateError;

/// Failure classifications surfaced by the handlers.
///
/// Every variant renders as `{"error": <message>}` with the matching status
/// code, so no request ever dies without a JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// Submission failed parsing or schema checks.
    Validation(Vec<String>),

    /// Malformed request data (bad query parameter, empty body).
    BadRequest(String),

    /// The requested record does not exist.
    NotFound(String),

    /// Template rendering failed.
    Template(TemplateError),

    /// Concurrent writers collided on a version.
    Conflict(String),

    /// The backend failed.
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { .. } => Self::Conflict(err.to_string()),
            other => {
                tracing::error!(error = %other, "Store operation failed");
                Self::Internal(format!("Internal server error: {other}"))
            }
        }
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        Self::Template(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Validation errors: {}", errors.join("; ")),
            ),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Template(err) => (
                StatusCode::BAD_REQUEST,
                format!("Template processing failed: {err}"),
            ),
            Self::Conflict(message) => (StatusCode::CONFLICT, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
