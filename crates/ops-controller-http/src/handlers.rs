// crates/ops-controller-http/src/handlers.rs
// ============================================================================
// Module: OpsController HTTP Handlers
// Description: Request parsing, auth, role gating, and dispatch to the
// use-cases.
// Purpose: Implement the external interface named in spec.md §6.
// Dependencies: axum, ops-controller-core, platform-core
// ============================================================================

//! ## Overview
//! Every non-health, non-metrics route requires [`crate::auth::authenticate`]
//! plus a per-route [`crate::auth::require_role`] call, per the role table in
//! spec.md §6.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use ops_controller_core::ActionId;
use ops_controller_core::CorrelationId;
use ops_controller_core::Environment;
use ops_controller_core::HealthReport;
use ops_controller_core::Incident;
use ops_controller_core::IncidentId;
use ops_controller_core::IncidentStatus;
use ops_controller_core::JobId;
use ops_controller_core::LogFilter;
use ops_controller_core::LogRecord;
use ops_controller_core::RemediationJob;
use ops_controller_core::RunbookAction;
use ops_controller_core::Service;
use ops_controller_core::ServiceId;
use ops_controller_core::Severity;
use ops_controller_core::Signal;
use ops_controller_core::SignalType;
use platform_core::Clock;
use platform_core::PlatformError;
use platform_core::SystemClock;
use serde::Deserialize;
use serde::Serialize;

use crate::auth::authenticate;
use crate::auth::require_role;
use crate::error::ApiError;
use crate::state::AppState;

const OPS_OR_ADMIN: &[&str] = &["ops", "admin"];
const ADMIN_ONLY: &[&str] = &["admin"];

// ============================================================================
// SECTION: Health & Metrics
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
    Json(HealthBody { status: "ok", service: "ops-controller" })
}

#[derive(Serialize)]
struct MetricsBody {
    /// Number of incidents known to the incident repository.
    incidents: usize,
    /// Number of remediation jobs known to the runbook repository.
    runbook_jobs: usize,
    /// Number of events recorded in the audit log.
    audit_events: usize,
}

/// `GET /metrics`.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<Json<MetricsBody>, ApiError> {
    let incidents = state.incidents.list()?.len();
    let runbook_jobs = state
        .runbook_repository
        .list_jobs()
        .map_err(|err| PlatformError::external(err.to_string()))?
        .len();
    let audit_events =
        state.audit_log.list().map_err(|err| PlatformError::external(err.to_string()))?.len();
    Ok(Json(MetricsBody { incidents, runbook_jobs, audit_events }))
}

// ============================================================================
// SECTION: Services
// ============================================================================

#[derive(Deserialize)]
pub struct ServiceIn {
    /// Caller-chosen stable id.
    id: String,
    /// Human-readable name.
    name: String,
    /// Deployment environment; defaults to `prod`.
    #[serde(default = "default_env")]
    env: Environment,
    /// Owning team or individual identifiers.
    #[serde(default)]
    owners: Vec<String>,
    /// Endpoint probed by `CheckHealth`, when configured.
    #[serde(default)]
    health_url: Option<String>,
    /// Endpoint logs are shipped to, when configured.
    #[serde(default)]
    logging_endpoint: Option<String>,
    /// Free-form labels.
    #[serde(default)]
    tags: Vec<String>,
    /// OpenTelemetry resource attributes.
    #[serde(default)]
    otel_config: BTreeMap<String, String>,
    /// Arbitrary caller metadata.
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

fn default_env() -> Environment {
    Environment::Prod
}

/// `POST /services`.
pub async fn register_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ServiceIn>,
) -> Result<Json<Service>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let service = Service {
        id: ServiceId::new(payload.id),
        name: payload.name,
        env: payload.env,
        owners: payload.owners,
        health_url: payload.health_url,
        logging_endpoint: payload.logging_endpoint,
        tags: payload.tags,
        otel_config: payload.otel_config,
        metadata: payload.metadata,
    };
    let registered = state.registry.register(service)?;
    Ok(Json(registered))
}

/// `GET /services`.
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Service>>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    Ok(Json(state.registry.list()?))
}

/// `GET /services/{service_id}`.
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(service_id): Path<String>,
) -> Result<Json<Service>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let service_id = ServiceId::new(service_id);
    let service = state
        .registry
        .get(&service_id)?
        .ok_or_else(|| PlatformError::not_found(format!("service_id={service_id} not registered")))?;
    Ok(Json(service))
}

// ============================================================================
// SECTION: Logs
// ============================================================================

#[derive(Deserialize)]
pub struct LogRecordIn {
    /// Deployment environment label, when supplied.
    #[serde(default)]
    env: Option<String>,
    /// Log level, when supplied.
    #[serde(default)]
    level: Option<String>,
    /// Log message body.
    message: String,
    /// Distributed trace id, when available.
    #[serde(default)]
    trace_id: Option<String>,
    /// Correlation id propagated from the triggering request.
    #[serde(default)]
    correlation_id: Option<String>,
    /// Container or process name that emitted the record.
    #[serde(default)]
    container_name: Option<String>,
    /// Additional structured fields.
    #[serde(default)]
    extra: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct AcceptedBody {
    /// Always `"accepted"`.
    status: &'static str,
}

/// `POST /logs/{service_id}`.
pub async fn ingest_log(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(service_id): Path<String>,
    Json(payload): Json<LogRecordIn>,
) -> Result<Json<AcceptedBody>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let record = LogRecord {
        service_id: ServiceId::new(service_id),
        env: payload.env,
        level: payload.level,
        message: payload.message,
        trace_id: payload.trace_id,
        correlation_id: payload.correlation_id.map(CorrelationId::new),
        container_name: payload.container_name,
        extra: payload.extra,
    };
    state.logs.ingest(record)?;
    Ok(Json(AcceptedBody { status: "accepted" }))
}

#[derive(Deserialize)]
pub struct LogSearchParams {
    /// Restrict to a single service.
    service_id: Option<String>,
    /// Restrict to a deployment environment label.
    env: Option<String>,
    /// Restrict to a log level.
    level: Option<String>,
    /// Restrict to a distributed trace id.
    trace_id: Option<String>,
    /// Restrict to a correlation id.
    correlation_id: Option<String>,
    /// Maximum number of records to return, newest first.
    limit: Option<usize>,
}

/// Default record count returned by `GET /logs` when `limit` is omitted.
const DEFAULT_LOG_LIMIT: usize = 100;

/// `GET /logs`.
pub async fn search_logs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<LogSearchParams>,
) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let filter = LogFilter {
        service_id: params.service_id.map(ServiceId::new),
        env: params.env,
        level: params.level,
        trace_id: params.trace_id,
        correlation_id: params.correlation_id,
        limit: params.limit.unwrap_or(DEFAULT_LOG_LIMIT),
    };
    Ok(Json(state.logs.search(&filter)?))
}

// ============================================================================
// SECTION: Health Check
// ============================================================================

/// `GET /health/{service_id}`.
pub async fn check_service_health(
    State(state): State<Arc<AppState>>,
    Path(service_id): Path<String>,
) -> Result<Json<HealthReport>, ApiError> {
    let report = state.health.check(&ServiceId::new(service_id))?;
    Ok(Json(report))
}

// ============================================================================
// SECTION: Incidents
// ============================================================================

#[derive(Deserialize)]
pub struct IncidentCreateIn {
    /// The service this incident concerns.
    service_id: String,
    /// Initial severity.
    severity: Severity,
    /// Human-readable summary.
    summary: String,
    /// Who opened the incident.
    actor: String,
    /// Correlation id propagated from the triggering request.
    #[serde(default)]
    correlation_id: Option<String>,
    /// Distributed trace id, when available.
    #[serde(default)]
    trace_id: Option<String>,
}

/// `POST /incidents`.
pub async fn create_incident(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<IncidentCreateIn>,
) -> Result<Json<Incident>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let incident = state.incidents.open_manual(
        ServiceId::new(payload.service_id),
        payload.severity,
        payload.summary,
        &payload.actor,
        payload.correlation_id.map(CorrelationId::new),
        payload.trace_id,
    )?;
    Ok(Json(incident))
}

#[derive(Deserialize)]
pub struct SignalIn {
    /// The service this signal concerns.
    service_id: String,
    /// Kind of signal.
    #[serde(rename = "type")]
    kind: SignalType,
    /// Severity assigned by the source.
    severity: Severity,
    /// Human-readable description.
    message: String,
    /// Distributed trace id, when available.
    #[serde(default)]
    trace_id: Option<String>,
    /// Correlation id propagated from the triggering request.
    #[serde(default)]
    correlation_id: Option<String>,
    /// Source-specific key/value attributes.
    #[serde(default)]
    attributes: BTreeMap<String, String>,
    /// Actor opening the incident on the signal's behalf.
    #[serde(default = "default_alert_actor")]
    actor: String,
}

fn default_alert_actor() -> String {
    "system".to_string()
}

/// `POST /alerts`.
pub async fn create_incident_from_signal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SignalIn>,
) -> Result<Json<Incident>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let signal = Signal {
        service_id: ServiceId::new(payload.service_id),
        kind: payload.kind,
        message: payload.message,
        severity: payload.severity,
        trace_id: payload.trace_id,
        correlation_id: payload.correlation_id.map(CorrelationId::new),
        timestamp: SystemClock.now(),
        attributes: payload.attributes,
    };
    let incident = state.incidents.open_from_signal(signal, &payload.actor)?;
    Ok(Json(incident))
}

/// `GET /incidents`.
pub async fn list_incidents(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Incident>>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    Ok(Json(state.incidents.list()?))
}

/// `GET /incidents/{incident_id}`.
pub async fn get_incident(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(incident_id): Path<String>,
) -> Result<Json<Incident>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    Ok(Json(state.incidents.get(&IncidentId::new(incident_id))?))
}

#[derive(Deserialize)]
pub struct StatusChangeIn {
    /// Target lifecycle state.
    status: IncidentStatus,
    /// Who requested the change.
    actor: String,
    /// Optional note appended to the timeline message.
    #[serde(default)]
    note: String,
}

/// `POST /incidents/{incident_id}/status`.
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(incident_id): Path<String>,
    Json(payload): Json<StatusChangeIn>,
) -> Result<Json<Incident>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let incident = state.incidents.transition(
        &IncidentId::new(incident_id),
        payload.status,
        &payload.actor,
        &payload.note,
    )?;
    Ok(Json(incident))
}

// ============================================================================
// SECTION: Runbooks
// ============================================================================

#[derive(Deserialize)]
pub struct RunbookActionIn {
    /// Caller-chosen stable id.
    id: String,
    /// Human-readable name.
    name: String,
    /// Human-readable description.
    description: String,
    /// Exhaustive whitelist of accepted parameter keys.
    #[serde(default)]
    allowed_params: Vec<String>,
    /// Minimum seconds between completed executions, zero disables the check.
    #[serde(default)]
    cooldown_seconds: i64,
    /// Whether execution must be approved before it runs.
    #[serde(default)]
    requires_approval: bool,
    /// Free-form operational guardrail metadata.
    #[serde(default)]
    guardrails: BTreeMap<String, String>,
}

/// `POST /runbooks/actions`.
pub async fn register_action(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RunbookActionIn>,
) -> Result<Json<RunbookAction>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, ADMIN_ONLY)?;
    let action = RunbookAction {
        id: ActionId::new(payload.id),
        name: payload.name,
        description: payload.description,
        allowed_params: payload.allowed_params,
        cooldown_seconds: payload.cooldown_seconds,
        requires_approval: payload.requires_approval,
        guardrails: payload.guardrails,
    };
    Ok(Json(state.runbooks.register_action(action)?))
}

/// `GET /runbooks/actions`.
pub async fn list_actions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<RunbookAction>>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    Ok(Json(state.runbooks.list_actions()?))
}

#[derive(Deserialize)]
pub struct RunbookExecuteIn {
    /// The service the action targets.
    service_id: String,
    /// The incident this execution is for.
    incident_id: String,
    /// The action to execute.
    action_id: String,
    /// Parameters supplied by the caller, validated against the whitelist.
    #[serde(default)]
    params: BTreeMap<String, String>,
    /// Who requested the execution.
    actor: String,
    /// Correlation id propagated from the triggering request.
    #[serde(default)]
    correlation_id: Option<String>,
}

/// `POST /runbooks/execute`.
pub async fn execute_runbook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RunbookExecuteIn>,
) -> Result<Json<RemediationJob>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, OPS_OR_ADMIN)?;
    let job = state.runbooks.execute(
        ServiceId::new(payload.service_id),
        IncidentId::new(payload.incident_id),
        ActionId::new(payload.action_id),
        payload.params,
        &payload.actor,
        payload.correlation_id.map(CorrelationId::new),
    )?;
    Ok(Json(job))
}

#[derive(Deserialize)]
pub struct RunbookApprovalIn {
    /// The job being approved.
    job_id: String,
    /// Who approved the job.
    approver: String,
    /// Optional approval note.
    #[serde(default)]
    note: String,
}

/// `POST /runbooks/approve`.
pub async fn approve_runbook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RunbookApprovalIn>,
) -> Result<Json<RemediationJob>, ApiError> {
    let ctx = authenticate(&state, &headers)?;
    require_role(&ctx, ADMIN_ONLY)?;
    let job = state.runbooks.approve(&JobId::new(payload.job_id), &payload.approver, &payload.note)?;
    Ok(Json(job))
}
