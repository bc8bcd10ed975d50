// crates/catalog-query/src/core/identifiers.rs
// ============================================================================
// Module: CatalogQuery Identifiers
// Description: Opaque identifier for a Book.
// Purpose: Give the domain and ports a strongly typed, serializable id.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! Books are usually imported with a caller-supplied id (see the original
//! import script), so [`BookId::new`] is the common path; [`BookId::generate`]
//! exists for callers that insert a book without one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Type
// ============================================================================

/// Opaque identifier for a [`crate::core::entities::Book`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Wraps a caller-supplied id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::BookId;

    #[test]
    fn wraps_the_caller_supplied_id_verbatim() {
        assert_eq!(BookId::new("book-1").as_str(), "book-1");
    }
}
