// crates/platform-core/src/identifiers.rs
// ============================================================================
// Module: Platform Identifiers
// Description: Opaque correlation identifier propagated end-to-end.
// Purpose: Give every service the same wire shape for request correlation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A correlation id is an opaque caller-supplied string threaded through
//! every audit event, timeline entry, and log record. This module does not
//! validate or generate them; callers own their shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Correlation Id
// ============================================================================

/// Request-scoped identifier propagated to every side effect.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Creates a new correlation id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for CorrelationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CorrelationId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::CorrelationId;

    #[test]
    fn round_trips_through_serde() {
        let id = CorrelationId::new("req-1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"req-1\"");
        let back: CorrelationId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
