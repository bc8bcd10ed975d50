// crates/catalog-query/src/error.rs
// ============================================================================
// Module: CatalogQuery HTTP Error Mapping
// Description: Maps repository and validation errors onto HTTP responses.
// Purpose: Give every handler one `?`-compatible error type.
// Dependencies: axum, crate::interfaces
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use crate::interfaces::RepositoryError;

// ============================================================================
// SECTION: Wire Error Body
// ============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Stable error-kind label, e.g. `"conflict"`.
    error: String,
    /// Human-readable detail safe to surface to callers.
    message: String,
}

/// Newtype wrapper so handlers can return `Result<_, ApiError>`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    /// Builds a `400 Bad Request` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, error: "validation", message: message.into() }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateIsbn(isbn) => {
                Self { status: StatusCode::CONFLICT, error: "conflict", message: format!("isbn already in use: {isbn}") }
            }
            RepositoryError::Backend(detail) => {
                Self { status: StatusCode::INTERNAL_SERVER_ERROR, error: "internal", message: detail }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.error.to_string(), message: self.message };
        (self.status, Json(body)).into_response()
    }
}
