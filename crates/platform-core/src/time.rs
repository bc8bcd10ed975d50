// crates/platform-core/src/time.rs
// ============================================================================
// Module: Platform Time
// Description: Wall-clock timestamp value type and the Clock port.
// Purpose: Keep use-cases testable by routing "now" through a trait instead
// of calling the system clock directly.
// Dependencies: time, serde
// ============================================================================

//! ## Overview
//! Every service needs real wall-clock timestamps (ingestion times, incident
//! timeline entries, scan commit timestamps), unlike a pure-replay engine.
//! `Timestamp` wraps a UTC instant; `Clock` is the port use-cases take as a
//! dependency so tests can supply a fixed time instead of the real one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// A UTC instant, serialized on the wire as RFC 3339.
///
/// # Invariants
/// - Always UTC; no local-offset values are constructed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Wraps an existing `OffsetDateTime`, normalizing it to UTC.
    #[must_use]
    pub fn new(instant: OffsetDateTime) -> Self {
        Self(instant.to_offset(time::UtcOffset::UTC))
    }

    /// Returns the Unix timestamp in whole seconds.
    #[must_use]
    pub const fn unix_seconds(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Parses an RFC 3339 timestamp string.
    ///
    /// # Errors
    /// Returns [`TimestampParseError`] when `value` is not valid RFC 3339.
    pub fn parse_rfc3339(value: &str) -> Result<Self, TimestampParseError> {
        OffsetDateTime::parse(value, &Rfc3339)
            .map(Self::new)
            .map_err(|source| TimestampParseError(source.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(formatted) => f.write_str(&formatted),
            Err(_) => f.write_str("<invalid-timestamp>"),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let formatted = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error returned when an RFC 3339 timestamp string fails to parse.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid RFC 3339 timestamp: {0}")]
pub struct TimestampParseError(String);

// ============================================================================
// SECTION: Clock Port
// ============================================================================

/// Source of the current time for use-cases.
///
/// # Invariants
/// - Implementations must be monotonic-enough for audit ordering within a
///   single process; strict monotonicity across processes is not required.
pub trait Clock: Send + Sync {
    /// Returns the current UTC instant.
    fn now(&self) -> Timestamp;
}

/// Real wall-clock adapter backed by [`OffsetDateTime::now_utc`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(OffsetDateTime::now_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::Clock;
    use super::SystemClock;
    use super::Timestamp;

    #[test]
    fn round_trips_through_rfc3339() {
        let original = SystemClock.now();
        let formatted = original.to_string();
        let parsed = Timestamp::parse_rfc3339(&formatted).expect("parse");
        assert_eq!(original.unix_seconds(), parsed.unix_seconds());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Timestamp::parse_rfc3339("not-a-timestamp").is_err());
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let stamp = Timestamp::parse_rfc3339("2024-01-02T03:04:05Z").expect("parse");
        let json = serde_json::to_string(&stamp).expect("serialize");
        assert_eq!(json, "\"2024-01-02T03:04:05Z\"");
    }
}
