// crates/knowledge-store-core/src/interfaces/mod.rs
// ============================================================================
// Module: KnowledgeStore Interfaces
// Description: Backend-agnostic ports for repository, search, and blob
// storage.
// Purpose: Define the contract surfaces the ingestion pipeline depends on
// without embedding any particular storage engine.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The pipeline depends only on these traits. Implementations live in
//! `knowledge-store-adapters`; this crate ships none, mirroring the
//! ports/adapters split the wider platform uses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::AuditEvent;
use crate::core::EntryId;
use crate::core::IngestionRun;
use crate::core::KnowledgeEntry;
use crate::core::RunId;
use crate::core::SourceType;

// ============================================================================
// SECTION: Knowledge Repository
// ============================================================================

/// Errors a [`KnowledgeRepository`] implementation may report.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend failed to complete the operation.
    #[error("repository backend error: {0}")]
    Backend(String),
}

/// Persistence port for knowledge entries and ingestion runs.
///
/// # Invariants
/// - `save_entry` overwrites the entry at `entry.id`; it never creates a
///   second entry for the same id.
/// - `record_run` is called at most once per distinct `run_id`.
pub trait KnowledgeRepository: Send + Sync {
    /// Looks up an entry by id.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the backend fails.
    fn get_entry(&self, entry_id: &EntryId) -> Result<Option<KnowledgeEntry>, RepositoryError>;

    /// Persists an entry, replacing any existing entry with the same id.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the backend fails.
    fn save_entry(&self, entry: &KnowledgeEntry) -> Result<(), RepositoryError>;

    /// Lists every known entry. Ordering is unspecified.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the backend fails.
    fn list_entries(&self) -> Result<Vec<KnowledgeEntry>, RepositoryError>;

    /// Stores a completed or failed ingestion run.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the backend fails.
    fn record_run(&self, run: &IngestionRun) -> Result<(), RepositoryError>;

    /// Looks up a previously stored run by id.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the backend fails.
    fn get_run(&self, run_id: &RunId) -> Result<Option<IngestionRun>, RepositoryError>;

    /// Appends audit events, preserving their relative order.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the backend fails.
    fn record_audit_events(&self, events: &[AuditEvent]) -> Result<(), RepositoryError>;
}

// ============================================================================
// SECTION: Search Index
// ============================================================================

/// Errors a [`SearchIndex`] implementation may report.
#[derive(Debug, Error)]
pub enum SearchIndexError {
    /// The backend failed to complete the operation.
    #[error("search index backend error: {0}")]
    Backend(String),
}

/// Filters accepted by [`SearchIndex::search`].
///
/// # Invariants
/// - An absent filter matches every entry on that dimension.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Case-insensitive substring match against the indexed text blob.
    pub text: Option<String>,
    /// Tag keys; a non-empty intersection with the entry's tags is required.
    pub tags: Vec<String>,
    /// Taxonomy tokens; a non-empty intersection is required.
    pub taxonomy: Vec<String>,
    /// Source type equality filter.
    pub source_types: Vec<SourceType>,
}

/// Text and facet index over knowledge entries.
///
/// # Invariants
/// - `index` re-indexes using the entry's current latest version; it
///   replaces any prior indexed state for that entry id.
pub trait SearchIndex: Send + Sync {
    /// Indexes (or re-indexes) an entry's latest version.
    ///
    /// # Errors
    /// Returns [`SearchIndexError`] when the backend fails.
    fn index(&self, entry: &KnowledgeEntry) -> Result<(), SearchIndexError>;

    /// Returns the ids of entries matching every supplied filter.
    ///
    /// # Errors
    /// Returns [`SearchIndexError`] when the backend fails.
    fn search(&self, query: &SearchQuery) -> Result<Vec<EntryId>, SearchIndexError>;
}

// ============================================================================
// SECTION: Blob Store
// ============================================================================

/// Errors a [`BlobStore`] implementation may report.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    /// The backend failed to complete the operation.
    #[error("blob store backend error: {0}")]
    Backend(String),
}

/// Raw-content storage, consulted only when configured.
pub trait BlobStore: Send + Sync {
    /// Persists raw content and returns a URI/reference for it.
    ///
    /// # Errors
    /// Returns [`BlobStoreError`] when the backend fails.
    fn store(
        &self,
        run_id: &RunId,
        external_id: &str,
        content_type: Option<&str>,
        content: &str,
    ) -> Result<String, BlobStoreError>;
}
