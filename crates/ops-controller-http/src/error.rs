// crates/ops-controller-http/src/error.rs
// ============================================================================
// Module: OpsController HTTP Error Mapping
// Description: Maps PlatformError kinds onto HTTP status codes.
// Purpose: Give every handler one `?`-compatible error type.
// Dependencies: platform-core, axum
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use platform_core::ErrorKind;
use platform_core::PlatformError;
use serde::Serialize;

// ============================================================================
// SECTION: Wire Error Body
// ============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Stable error-kind label, e.g. `"not_found"`.
    error: String,
    /// Human-readable detail safe to surface to callers.
    message: String,
}

/// Newtype wrapper so handlers can return `Result<_, ApiError>` and rely on
/// `?` from [`PlatformError`].
#[derive(Debug)]
pub struct ApiError(pub PlatformError);

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::External => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody { error: self.0.kind.to_string(), message: self.0.message };
        (status, Json(body)).into_response()
    }
}
