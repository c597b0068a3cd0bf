use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalog_core::DomainError;
use catalog_products::ValidationErrors;

pub const INVALID_JSON: &str = "Bad Request - Invalid JSON";
pub const ARGUMENTS_INVALID: &str = "Bad Request - Arguments Invalid";
pub const INTERNAL_ERROR: &str = "Internal Server Error";

/// Uniform error envelope returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub path: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: status.as_u16(),
            error: error.into(),
            path: path.into(),
        }
    }
}

/// Failures surfaced by the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not JSON, or a field has the wrong primitive type.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Well-formed body that fails a product constraint.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Query string that does not name a known filter value.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub fn api_error_to_response(err: ApiError, path: &str) -> axum::response::Response {
    match err {
        ApiError::MalformedRequest(msg) => {
            tracing::debug!(%path, "malformed request: {msg}");
            json_error(StatusCode::BAD_REQUEST, INVALID_JSON, path)
        }
        ApiError::Validation(errors) => {
            if let Some(first) = errors.first() {
                tracing::debug!(%path, field = first.field, "validation failed: {}", first.message);
            }
            json_error(StatusCode::BAD_REQUEST, ARGUMENTS_INVALID, path)
        }
        ApiError::InvalidQuery(msg) => {
            tracing::debug!(%path, "invalid query: {msg}");
            json_error(StatusCode::BAD_REQUEST, ARGUMENTS_INVALID, path)
        }
        ApiError::Domain(DomainError::Validation(msg)) => {
            tracing::debug!(%path, "domain validation failed: {msg}");
            json_error(StatusCode::BAD_REQUEST, ARGUMENTS_INVALID, path)
        }
        ApiError::Domain(e @ DomainError::InvariantViolation(_)) => {
            tracing::error!(%path, "catalog invariant violated: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, path)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    error: impl Into<String>,
    path: &str,
) -> axum::response::Response {
    (status, axum::Json(ErrorResponse::new(status, error, path))).into_response()
}
