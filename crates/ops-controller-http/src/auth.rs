// crates/ops-controller-http/src/auth.rs
// ============================================================================
// Module: OpsController Auth
// Description: Shared-secret and role-based authorization for handlers.
// Purpose: Implement spec.md §6's `X-API-Key`/`X-Actor`/`X-Roles` contract.
// Dependencies: axum, platform-core
// ============================================================================

//! ## Overview
//! `X-API-Key` is checked only when the server is configured with one.
//! `X-Actor` defaults to `"anonymous"`; `X-Roles` is a comma list, matched
//! case-insensitively against the route's required role set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::HeaderMap;
use platform_core::PlatformError;

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// SECTION: Auth Context
// ============================================================================

/// Identity and roles presented by the caller.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// `X-Actor` header value, or `"anonymous"` when absent.
    pub actor: String,
    /// Lowercased, trimmed `X-Roles` values.
    pub roles: Vec<String>,
}

/// Validates `X-API-Key` (when configured) and parses `X-Actor`/`X-Roles`.
///
/// # Errors
/// Returns [`ApiError`] with `ErrorKind::Authentication` if a configured
/// API key is missing or mismatched.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthContext, ApiError> {
    if let Some(expected) = &state.api_key {
        let presented = headers.get("X-API-Key").and_then(|value| value.to_str().ok());
        if presented != Some(expected.as_str()) {
            return Err(PlatformError::authentication("missing or invalid X-API-Key").into());
        }
    }

    let actor = headers
        .get("X-Actor")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("anonymous")
        .to_string();

    let roles = headers
        .get("X-Roles")
        .and_then(|value| value.to_str().ok())
        .map(|raw| raw.split(',').map(|role| role.trim().to_lowercase()).filter(|role| !role.is_empty()).collect())
        .unwrap_or_default();

    Ok(AuthContext { actor, roles })
}

/// Fails with `ErrorKind::Authorization` unless `ctx` holds one of `allowed`.
///
/// # Errors
/// Returns [`ApiError`] with `ErrorKind::Authorization` if none of `ctx`'s
/// roles appear in `allowed`.
pub fn require_role(ctx: &AuthContext, allowed: &[&str]) -> Result<(), ApiError> {
    let permitted = allowed.iter().any(|role| ctx.roles.iter().any(|held| held == role));
    if permitted {
        Ok(())
    } else {
        Err(PlatformError::authorization("caller role does not permit this operation").into())
    }
}

#[cfg(test)]
mod tests {
    use super::AuthContext;
    use super::require_role;

    #[test]
    fn require_role_accepts_any_matching_role() {
        let ctx = AuthContext { actor: "alice".to_string(), roles: vec!["ops".to_string()] };
        assert!(require_role(&ctx, &["ops", "admin"]).is_ok());
    }

    #[test]
    fn require_role_rejects_when_no_role_matches() {
        let ctx = AuthContext { actor: "alice".to_string(), roles: vec!["viewer".to_string()] };
        assert!(require_role(&ctx, &["ops", "admin"]).is_err());
    }
}
