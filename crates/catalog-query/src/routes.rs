// crates/catalog-query/src/routes.rs
// ============================================================================
// Module: CatalogQuery Routes
// Description: Builds the axum Router wiring every handler to its path.
// Purpose: One place naming the external interface's route table.
// Dependencies: axum
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use axum::routing::post;

use crate::handlers;
use crate::state::AppState;

/// Builds the CatalogQuery HTTP router.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/books", get(handlers::list_books).post(handlers::insert_book))
        .route("/health", get(handlers::health))
        .with_state(state)
}
