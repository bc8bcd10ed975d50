// crates/knowledge-store-core/src/runtime/search.rs
// ============================================================================
// Module: KnowledgeStore Search
// Description: Resolves a search query through the index, then hydrates
// entries from the repository.
// Purpose: Keep the index's id-only contract and the repository's entry
// hydration as two separate concerns behind one use-case.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Ordering of results is unspecified but stable for identical inputs: this
//! implementation preserves the index's own result order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::KnowledgeEntry;
use crate::interfaces::KnowledgeRepository;
use crate::interfaces::SearchIndex;
use crate::interfaces::SearchQuery;

/// Resolves a [`SearchQuery`] into hydrated entries.
pub struct SearchUseCase {
    /// Repository port used to hydrate entries returned by the index.
    repository: Arc<dyn KnowledgeRepository>,
    /// Search index port resolving a query to matching entry ids.
    index: Arc<dyn SearchIndex>,
}

impl SearchUseCase {
    /// Builds the use-case over the given ports.
    #[must_use]
    pub fn new(repository: Arc<dyn KnowledgeRepository>, index: Arc<dyn SearchIndex>) -> Self {
        Self { repository, index }
    }

    /// Runs `query` against the index, then hydrates matching entries.
    ///
    /// # Errors
    /// Returns a [`platform_core::PlatformError`] when the index or
    /// repository fails.
    pub fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<KnowledgeEntry>, platform_core::PlatformError> {
        let ids = self
            .index
            .search(query)
            .map_err(|err| platform_core::PlatformError::external(err.to_string()))?;

        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(entry) = self
                .repository
                .get_entry(&id)
                .map_err(|err| platform_core::PlatformError::external(err.to_string()))?
            {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}
