// crates/knowledge-store-http/src/state.rs
// ============================================================================
// Module: KnowledgeStore Server State
// Description: Shared state constructed once at process start and handed to
// every handler via axum's State extractor.
// Purpose: Explicit constructor wiring in place of decorator-based DI.
// Dependencies: knowledge-store-core, knowledge-store-adapters, platform-core
// ============================================================================

//! ## Overview
//! `AppState` owns the use-cases, not the adapters directly; handlers only
//! ever call through `ingest`, `search`, and `reprocess`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use knowledge_store_adapters::InMemoryBlobStore;
use knowledge_store_adapters::InMemoryKnowledgeRepository;
use knowledge_store_adapters::InMemorySearchIndex;
use knowledge_store_core::IngestionPipeline;
use knowledge_store_core::KnowledgeRepository;
use knowledge_store_core::ReprocessUseCase;
use knowledge_store_core::SearchUseCase;
use platform_core::NoopHook;
use platform_core::SystemClock;

use crate::config::Config;

/// Shared server state for KnowledgeStore HTTP handlers.
pub struct AppState {
    /// Optional shared-secret required on `X-API-Key` for non-health routes.
    pub api_key: Option<String>,
    /// The ingestion use-case.
    pub ingest: IngestionPipeline,
    /// The search use-case.
    pub search: SearchUseCase,
    /// The reprocess use-case.
    pub reprocess: ReprocessUseCase,
    /// Direct repository access for `GET /runs/{run_id}`, which reads a run
    /// summary rather than driving a use-case.
    pub repository: Arc<dyn KnowledgeRepository>,
}

impl AppState {
    /// Wires the in-memory adapters into the use-cases.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let repository = Arc::new(InMemoryKnowledgeRepository::new());
        let index = Arc::new(InMemorySearchIndex::new());
        let blob_store: Option<Arc<dyn knowledge_store_core::BlobStore>> =
            config.blob_bucket.as_ref().map(|_| {
                Arc::new(InMemoryBlobStore::new()) as Arc<dyn knowledge_store_core::BlobStore>
            });
        let clock = Arc::new(SystemClock);
        let hook = Arc::new(NoopHook);

        Self {
            api_key: config.api_key.clone(),
            ingest: IngestionPipeline::new(
                Arc::clone(&repository) as Arc<dyn knowledge_store_core::KnowledgeRepository>,
                Arc::clone(&index) as Arc<dyn knowledge_store_core::SearchIndex>,
                blob_store,
                clock,
                hook,
            ),
            search: SearchUseCase::new(
                Arc::clone(&repository) as Arc<dyn knowledge_store_core::KnowledgeRepository>,
                Arc::clone(&index) as Arc<dyn knowledge_store_core::SearchIndex>,
            ),
            reprocess: ReprocessUseCase::new(
                Arc::clone(&repository) as Arc<dyn knowledge_store_core::KnowledgeRepository>,
            ),
            repository: repository as Arc<dyn knowledge_store_core::KnowledgeRepository>,
        }
    }
}
