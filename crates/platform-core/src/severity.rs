// crates/platform-core/src/severity.rs
// ============================================================================
// Module: Platform Severity
// Description: Ordered severity enumeration shared by every service.
// Purpose: Provide one ordering for incident severity, finding severity, and
// verdict thresholds.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Severity is totally ordered `INFO < LOW < MEDIUM < HIGH < CRITICAL`. The
//! derive order below is the source of truth for that ordering; do not
//! reorder variants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Severity
// ============================================================================

/// Ordered severity level.
///
/// # Invariants
/// - Variant declaration order is the comparison order (derive relies on it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Informational, no action implied.
    Info,
    /// Low severity.
    Low,
    /// Medium severity.
    Medium,
    /// High severity.
    High,
    /// Critical severity; gates short-circuit on this.
    Critical,
}

impl Severity {
    /// Returns the canonical uppercase label used on the wire and in rule tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Self::Info),
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            other => Err(SeverityParseError(other.to_string())),
        }
    }
}

/// Error returned when a severity string does not match a known level.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct SeverityParseError(String);

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Severity;

    #[test]
    fn orders_info_below_critical() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Severity::from_str("high").unwrap(), Severity::High);
        assert_eq!(Severity::from_str("CRITICAL").unwrap(), Severity::Critical);
        assert!(Severity::from_str("bogus").is_err());
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&Severity::High).expect("serialize");
        assert_eq!(json, "\"HIGH\"");
    }
}
