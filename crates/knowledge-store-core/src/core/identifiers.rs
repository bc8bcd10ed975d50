// crates/knowledge-store-core/src/core/identifiers.rs
// ============================================================================
// Module: KnowledgeStore Identifiers
// Description: Opaque identifiers for entries, versions, and ingestion runs.
// Purpose: Give the domain and ports strongly typed, serializable ids.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! `EntryId` is derived (`"<source.id>:<external_id>"`), not freely
//! constructed; `VersionId` and `RunId` are opaque strings generated by
//! callers or the runtime. None of these types validate their contents
//! beyond non-emptiness at the constructor that derives them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Identifier of a knowledge entry: `"<source.id>:<external_id>"`.
///
/// # Invariants
/// - Always produced by [`EntryId::derive`]; never constructed from an
///   arbitrary caller string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Derives the canonical entry id from a source id and external id.
    #[must_use]
    pub fn derive(source_id: &str, external_id: &str) -> Self {
        Self(format!("{source_id}:{external_id}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier for a single version of a knowledge entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    /// Generates a fresh random version id.
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

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier for an ingestion run, supplied by the caller or
/// generated when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Generates a fresh random run id.
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

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::EntryId;

    #[test]
    fn derives_canonical_entry_id() {
        let id = EntryId::derive("s1", "doc-1");
        assert_eq!(id.as_str(), "s1:doc-1");
    }
}
