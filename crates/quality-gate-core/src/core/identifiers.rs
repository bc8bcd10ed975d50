// crates/quality-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: QualityGate Identifiers
// Description: Opaque identifiers for findings, scans, and waivers.
// Purpose: Give the domain and ports strongly typed, serializable ids.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! All three identifiers are assigned by a persistence layer, not by the
//! domain itself: a freshly constructed [`crate::core::entities::Finding`]
//! or [`crate::core::entities::Scan`] carries `id = None` until something
//! stores it and calls [`FindingId::generate`] / [`ScanId::generate`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Opaque identifier assigned to a [`crate::core::entities::Finding`] once stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingId(String);

impl FindingId {
    /// Generates a fresh random finding id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, for example one loaded from storage.
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

impl fmt::Display for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier assigned to a [`crate::core::entities::Scan`] once stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(String);

impl ScanId {
    /// Generates a fresh random scan id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wraps an existing id.
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

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier assigned to a [`crate::core::entities::Waiver`] once stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaiverId(String);

impl WaiverId {
    /// Generates a fresh random waiver id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wraps an existing id.
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

impl fmt::Display for WaiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::FindingId;
    use super::ScanId;

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(FindingId::generate(), FindingId::generate());
        assert_ne!(ScanId::generate(), ScanId::generate());
    }
}
