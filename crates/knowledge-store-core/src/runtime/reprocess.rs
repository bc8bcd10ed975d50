// crates/knowledge-store-core/src/runtime/reprocess.rs
// ============================================================================
// Module: KnowledgeStore Reprocess
// Description: Pure replay of a previously completed ingestion run.
// Purpose: Implement the pinned "pure replay" interpretation of Reprocess
// (see DESIGN.md) without re-invoking the pipeline.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! `Reprocess(run_id)` looks up the stored run and returns its results
//! unchanged. Unknown run ids fail with [`platform_core::ErrorKind::NotFound`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use platform_core::PlatformError;

use crate::core::IngestionResult;
use crate::core::RunId;
use crate::interfaces::KnowledgeRepository;

/// Replays a stored ingestion run.
pub struct ReprocessUseCase {
    /// Repository port used to look up the stored run.
    repository: Arc<dyn KnowledgeRepository>,
}

impl ReprocessUseCase {
    /// Builds the use-case over the given repository port.
    #[must_use]
    pub fn new(repository: Arc<dyn KnowledgeRepository>) -> Self {
        Self { repository }
    }

    /// Returns the stored results for `run_id` unchanged.
    ///
    /// # Errors
    /// Returns [`platform_core::ErrorKind::NotFound`] when no run with this
    /// id exists, or [`platform_core::ErrorKind::External`] when the
    /// repository fails.
    pub fn reprocess(&self, run_id: &RunId) -> Result<Vec<IngestionResult>, PlatformError> {
        let run = self
            .repository
            .get_run(run_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .ok_or_else(|| PlatformError::not_found(format!("run {run_id} does not exist")))?;
        Ok(run.results)
    }
}
