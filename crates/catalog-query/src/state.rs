// crates/catalog-query/src/state.rs
// ============================================================================
// Module: CatalogQuery Server State
// Description: Shared state constructed once at process start and handed to
// every handler via axum's State extractor.
// Purpose: Explicit constructor wiring in place of decorator-based DI.
// Dependencies: platform-core
// ============================================================================

//! ## Overview
//! `AppState` owns the use-cases, not the adapter directly; handlers only
//! ever call through `insert` and `list`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use platform_core::Clock;
use platform_core::SystemClock;

use crate::adapters::InMemoryBookRepository;
use crate::interfaces::BookRepository;
use crate::runtime::InsertBookUseCase;
use crate::runtime::ListBooksUseCase;

/// Shared server state for CatalogQuery HTTP handlers.
pub struct AppState {
    /// The insert use-case.
    pub insert: InsertBookUseCase,
    /// The list use-case.
    pub list: ListBooksUseCase,
}

impl AppState {
    /// Wires the in-memory adapter into the use-cases.
    #[must_use]
    pub fn new() -> Self {
        let repository: Arc<dyn BookRepository> = Arc::new(InMemoryBookRepository::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            insert: InsertBookUseCase::new(Arc::clone(&repository), clock),
            list: ListBooksUseCase::new(repository),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
