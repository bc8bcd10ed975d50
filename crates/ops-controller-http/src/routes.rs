// crates/ops-controller-http/src/routes.rs
// ============================================================================
// Module: OpsController Routes
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

/// Builds the OpsController HTTP router.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/services", post(handlers::register_service).get(handlers::list_services))
        .route("/services/{service_id}", get(handlers::get_service))
        .route("/logs/{service_id}", post(handlers::ingest_log))
        .route("/logs", get(handlers::search_logs))
        .route("/health/{service_id}", get(handlers::check_service_health))
        .route("/incidents", post(handlers::create_incident).get(handlers::list_incidents))
        .route("/incidents/{incident_id}", get(handlers::get_incident))
        .route("/incidents/{incident_id}/status", post(handlers::change_status))
        .route("/alerts", post(handlers::create_incident_from_signal))
        .route("/runbooks/actions", post(handlers::register_action).get(handlers::list_actions))
        .route("/runbooks/execute", post(handlers::execute_runbook))
        .route("/runbooks/approve", post(handlers::approve_runbook))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
}
