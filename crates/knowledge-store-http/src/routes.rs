// crates/knowledge-store-http/src/routes.rs
// ============================================================================
// Module: KnowledgeStore Routes
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

/// Builds the KnowledgeStore HTTP router.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ingestions", post(handlers::ingest))
        .route("/search", get(handlers::search))
        .route("/reprocess/{run_id}", post(handlers::reprocess))
        .route("/runs/{run_id}", get(handlers::get_run))
        .route("/health", get(handlers::health))
        .with_state(state)
}
