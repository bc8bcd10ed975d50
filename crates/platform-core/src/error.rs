// crates/platform-core/src/error.rs
// ============================================================================
// Module: Platform Error Taxonomy
// Description: Shared error kind and carrier type used by every port.
// Purpose: Let each service map its thiserror port errors onto one small
// taxonomy that HTTP and CLI edges translate into status codes and exit
// codes without re-deriving the mapping per service.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Port-level errors (`DocumentStoreError`, `RunbookRepositoryError`, and so
//! on) stay specific to their port and are defined with `thiserror` next to
//! the trait they belong to. `PlatformError` is the coarser classification
//! those specific errors fold into at a use-case or edge boundary, so an
//! axum handler or CLI exit-code switch has one small enum to match on
//! instead of one per port.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Error Kind
// ============================================================================

/// Coarse classification every service error folds into at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was structurally or semantically invalid.
    Validation,
    /// The caller presented no credentials or invalid ones.
    Authentication,
    /// The caller was authenticated but lacks the required role.
    Authorization,
    /// The referenced resource does not exist.
    NotFound,
    /// The request conflicts with the current state of the resource.
    Conflict,
    /// A dependency outside the process failed or timed out.
    External,
    /// An unexpected internal failure; callers should not retry.
    Internal,
}

impl ErrorKind {
    /// Returns a stable lowercase label used in logs and observability events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::External => "external",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Platform Error
// ============================================================================

/// A classified error carrying a human-readable message.
///
/// # Invariants
/// - `message` is safe to return to a caller; it must not embed secrets.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct PlatformError {
    /// Coarse classification used for status-code and exit-code mapping.
    pub kind: ErrorKind,
    /// Human-readable detail safe to surface to callers.
    pub message: String,
}

impl PlatformError {
    /// Builds a new classified error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// Builds a [`ErrorKind::Validation`] error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Builds a [`ErrorKind::NotFound`] error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Builds a [`ErrorKind::Conflict`] error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Builds a [`ErrorKind::Authentication`] error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Builds a [`ErrorKind::Authorization`] error.
    #[must_use]
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Builds a [`ErrorKind::External`] error.
    #[must_use]
    pub fn external(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::External, message)
    }

    /// Builds a [`ErrorKind::Internal`] error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;
    use super::PlatformError;

    #[test]
    fn display_includes_kind_and_message() {
        let err = PlatformError::not_found("entry abc123 does not exist");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.to_string(), "not_found: entry abc123 does not exist");
    }

    #[test]
    fn kind_labels_are_stable() {
        assert_eq!(ErrorKind::Validation.as_str(), "validation");
        assert_eq!(ErrorKind::Authentication.as_str(), "authentication");
        assert_eq!(ErrorKind::Authorization.as_str(), "authorization");
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
        assert_eq!(ErrorKind::Conflict.as_str(), "conflict");
        assert_eq!(ErrorKind::External.as_str(), "external");
        assert_eq!(ErrorKind::Internal.as_str(), "internal");
    }
}
