// crates/knowledge-store-http/src/handlers.rs
// ============================================================================
// Module: KnowledgeStore HTTP Handlers
// Description: Request parsing, auth, and dispatch to the use-cases.
// Purpose: Implement the external interface named in spec.md §6.
// Dependencies: axum, knowledge-store-core, platform-core
// ============================================================================

//! ## Overview
//! `POST /ingestions` accepts one batch sharing an optional `run_id` query
//! parameter. `GET /search` accepts comma-separated multi-value query
//! parameters. All routes except `/health` check `X-API-Key` when the
//! server is configured with one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use knowledge_store_core::IngestOutcome;
use knowledge_store_core::IngestionRequest;
use knowledge_store_core::IngestionResult;
use knowledge_store_core::KnowledgeEntry;
use knowledge_store_core::RunId;
use knowledge_store_core::SearchQuery;
use knowledge_store_core::SourceType;
use platform_core::PlatformError;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// SECTION: Auth
// ============================================================================

/// Checks `X-API-Key` against the configured shared secret, when one is set.
pub fn check_api_key(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = &state.api_key else {
        return Ok(());
    };
    let presented = headers.get("X-API-Key").and_then(|value| value.to_str().ok());
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(PlatformError::authentication("missing or invalid X-API-Key").into())
    }
}

// ============================================================================
// SECTION: Health
// ============================================================================

#[derive(Serialize)]
struct HealthBody {
    /// Always `"ok"`; the handler only runs when the process is up.
    status: &'static str,
    /// Fixed service name, useful when aggregating health checks.
    service: &'static str,
}

/// `GET /health`.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok", service: "knowledge-store" })
}

// ============================================================================
// SECTION: Ingestions
// ============================================================================

#[derive(Deserialize)]
pub struct IngestQueryParams {
    /// Caller-supplied batch run id, enabling idempotent retry.
    run_id: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum IngestionResultWire {
    Succeeded(IngestionResult),
    Failed { external_id: String, error: String },
}

/// `POST /ingestions`.
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<IngestQueryParams>,
    Json(requests): Json<Vec<IngestionRequest>>,
) -> Result<Json<Vec<IngestionResultWire>>, ApiError> {
    check_api_key(&state, &headers)?;
    let run_id = params.run_id.map(RunId::new);
    let outcomes = state.ingest.ingest(run_id, requests)?;
    let wire = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            IngestOutcome::Succeeded(result) => IngestionResultWire::Succeeded(result),
            IngestOutcome::Failed { external_id, detail } => {
                IngestionResultWire::Failed { external_id, error: detail }
            }
        })
        .collect();
    Ok(Json(wire))
}

// ============================================================================
// SECTION: Search
// ============================================================================

#[derive(Deserialize)]
pub struct SearchQueryParams {
    /// Free-text substring filter.
    text: Option<String>,
    /// Comma-separated tag keys, ANDed with other filters.
    tags: Option<String>,
    /// Comma-separated taxonomy labels.
    taxonomy: Option<String>,
    /// Comma-separated source type tokens, e.g. `quality-gate,ops`.
    source_types: Option<String>,
}

fn split_comma(value: Option<&String>) -> Vec<String> {
    value
        .map(|raw| raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default()
}

/// `GET /search`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<Vec<KnowledgeEntry>>, ApiError> {
    check_api_key(&state, &headers)?;

    let mut source_types = Vec::new();
    for token in split_comma(params.source_types.as_ref()) {
        let parsed = parse_source_type(&token)?;
        source_types.push(parsed);
    }

    let query = SearchQuery {
        text: params.text,
        tags: split_comma(params.tags.as_ref()),
        taxonomy: split_comma(params.taxonomy.as_ref()),
        source_types,
    };
    let entries = state.search.search(&query)?;
    Ok(Json(entries))
}

fn parse_source_type(token: &str) -> Result<SourceType, ApiError> {
    match token {
        "quality-gate" => Ok(SourceType::QualityGate),
        "ops" => Ok(SourceType::Ops),
        "code-gen" => Ok(SourceType::CodeGen),
        "other" => Ok(SourceType::Other),
        other => {
            Err(PlatformError::validation(format!("unknown source type {other:?}")).into())
        }
    }
}

// ============================================================================
// SECTION: Reprocess
// ============================================================================

/// `POST /reprocess/{run_id}`.
pub async fn reprocess(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(run_id): Path<String>,
) -> Result<Json<Vec<IngestionResult>>, ApiError> {
    check_api_key(&state, &headers)?;
    let results = state.reprocess.reprocess(&RunId::new(run_id))?;
    Ok(Json(results))
}

// ============================================================================
// SECTION: Run Summary
// ============================================================================

/// `GET /runs/{run_id}`.
pub async fn get_run(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(run_id): Path<String>,
) -> Result<Json<knowledge_store_core::IngestionRun>, ApiError> {
    check_api_key(&state, &headers)?;
    let run_id = RunId::new(run_id);
    let run = state
        .repository
        .get_run(&run_id)
        .map_err(|err| PlatformError::external(err.to_string()))?
        .ok_or_else(|| PlatformError::not_found(format!("run {run_id} does not exist")))?;
    Ok(Json(run))
}
