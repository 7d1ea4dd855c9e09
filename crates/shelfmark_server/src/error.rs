//! HTTP error envelope.
//!
//! # Responsibility
//! - Map catalog errors onto status codes and the `{"detail": ...}` body.
//!
//! # Invariants
//! - Bad input, missing resource and internal fault are always
//!   distinguishable by status code.
//! - Internal fault details stay in the server log; clients only ever see
//!   the fixed `internal error` detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use shelfmark_core::CatalogError;

/// Error rendered to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    /// Request shape is malformed; rejected before any storage access.
    Validation(String),
    /// Referenced resource does not exist.
    NotFound(String),
    /// Unexpected internal failure.
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Validation(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            Self::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::BookNotFound(_) => Self::NotFound("Book not found".to_string()),
            CatalogError::Repo(err) => {
                error!("event=http_error module=server status=error error={err}");
                Self::Internal
            }
        }
    }
}
