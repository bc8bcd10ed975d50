// crates/ops-controller-core/src/interfaces/mod.rs
// ============================================================================
// Module: OpsController Interfaces
// Description: Backend-agnostic ports for the registry, log sink, incident
// store, runbook store, audit log, integration bus, and health probe.
// Purpose: Define the contract surfaces the use-cases depend on without
// embedding a particular backend.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Every use-case in `crate::runtime` depends only on these traits.
//! Implementations live in `ops-controller-adapters`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ActionId;
use crate::core::Incident;
use crate::core::IncidentId;
use crate::core::JobId;
use crate::core::LogRecord;
use crate::core::RemediationJob;
use crate::core::RunbookAction;
use crate::core::Service;
use crate::core::ServiceId;
use crate::core::TimelineEvent;

// ============================================================================
// SECTION: Service Repository
// ============================================================================

/// Errors a [`ServiceRepository`] implementation may report.
#[derive(Debug, Error)]
pub enum ServiceRepositoryError {
    /// The backend failed to complete the operation.
    #[error("service repository backend error: {0}")]
    Backend(String),
}

/// Persistence port for registered services.
pub trait ServiceRepository: Send + Sync {
    /// Inserts or replaces the service with the same id.
    ///
    /// # Errors
    /// Returns [`ServiceRepositoryError`] when the backend fails.
    fn upsert(&self, service: &Service) -> Result<(), ServiceRepositoryError>;

    /// Looks up a service by id.
    ///
    /// # Errors
    /// Returns [`ServiceRepositoryError`] when the backend fails.
    fn get(&self, service_id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError>;

    /// Lists every registered service. Ordering is unspecified.
    ///
    /// # Errors
    /// Returns [`ServiceRepositoryError`] when the backend fails.
    fn list(&self) -> Result<Vec<Service>, ServiceRepositoryError>;
}

// ============================================================================
// SECTION: Log Sink
// ============================================================================

/// Errors a [`LogSink`] implementation may report.
#[derive(Debug, Error)]
pub enum LogSinkError {
    /// The backend failed to complete the operation.
    #[error("log sink backend error: {0}")]
    Backend(String),
}

/// Filters accepted by [`LogSink::search`].
///
/// # Invariants
/// - An absent filter matches every record on that dimension.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Restrict to a single service.
    pub service_id: Option<ServiceId>,
    /// Restrict to a deployment environment label.
    pub env: Option<String>,
    /// Restrict to a log level.
    pub level: Option<String>,
    /// Restrict to a distributed trace id.
    pub trace_id: Option<String>,
    /// Restrict to a correlation id.
    pub correlation_id: Option<String>,
    /// Maximum number of records to return, newest first.
    pub limit: usize,
}

/// Append-only log storage with bounded, filtered search.
pub trait LogSink: Send + Sync {
    /// Appends a log record for `service_id`.
    ///
    /// # Errors
    /// Returns [`LogSinkError`] when the backend fails.
    fn ingest(&self, record: &LogRecord) -> Result<(), LogSinkError>;

    /// Returns records matching every supplied filter, newest first,
    /// capped at `filter.limit`.
    ///
    /// # Errors
    /// Returns [`LogSinkError`] when the backend fails.
    fn search(&self, filter: &LogFilter) -> Result<Vec<LogRecord>, LogSinkError>;
}

// ============================================================================
// SECTION: Incident Repository
// ============================================================================

/// Errors an [`IncidentRepository`] implementation may report.
#[derive(Debug, Error)]
pub enum IncidentRepositoryError {
    /// The backend failed to complete the operation.
    #[error("incident repository backend error: {0}")]
    Backend(String),
}

/// Persistence port for incidents.
///
/// # Invariants
/// - `save` overwrites the incident at `incident.id`, preserving the
///   append-only timeline the domain type already enforces.
pub trait IncidentRepository: Send + Sync {
    /// Persists an incident, replacing any existing incident with the same id.
    ///
    /// # Errors
    /// Returns [`IncidentRepositoryError`] when the backend fails.
    fn save(&self, incident: &Incident) -> Result<(), IncidentRepositoryError>;

    /// Looks up an incident by id.
    ///
    /// # Errors
    /// Returns [`IncidentRepositoryError`] when the backend fails.
    fn get(&self, incident_id: &IncidentId) -> Result<Option<Incident>, IncidentRepositoryError>;

    /// Lists every known incident. Ordering is unspecified.
    ///
    /// # Errors
    /// Returns [`IncidentRepositoryError`] when the backend fails.
    fn list(&self) -> Result<Vec<Incident>, IncidentRepositoryError>;
}

// ============================================================================
// SECTION: Runbook Repository
// ============================================================================

/// Errors a [`RunbookRepository`] implementation may report.
#[derive(Debug, Error)]
pub enum RunbookRepositoryError {
    /// The backend failed to complete the operation.
    #[error("runbook repository backend error: {0}")]
    Backend(String),
}

/// Persistence port for allow-listed actions and their remediation jobs.
///
/// # Invariants
/// - `list_jobs` must reflect every previously saved job so cooldown
///   evaluation can see all prior finished jobs (spec.md §5).
pub trait RunbookRepository: Send + Sync {
    /// Registers (or replaces) an allow-listed action.
    ///
    /// # Errors
    /// Returns [`RunbookRepositoryError`] when the backend fails.
    fn add_action(&self, action: &RunbookAction) -> Result<(), RunbookRepositoryError>;

    /// Looks up an action by id.
    ///
    /// # Errors
    /// Returns [`RunbookRepositoryError`] when the backend fails.
    fn get_action(&self, action_id: &ActionId) -> Result<Option<RunbookAction>, RunbookRepositoryError>;

    /// Lists every registered action. Ordering is unspecified.
    ///
    /// # Errors
    /// Returns [`RunbookRepositoryError`] when the backend fails.
    fn list_actions(&self) -> Result<Vec<RunbookAction>, RunbookRepositoryError>;

    /// Persists a remediation job, replacing any existing job with the same id.
    ///
    /// # Errors
    /// Returns [`RunbookRepositoryError`] when the backend fails.
    fn save_job(&self, job: &RemediationJob) -> Result<(), RunbookRepositoryError>;

    /// Looks up a remediation job by id.
    ///
    /// # Errors
    /// Returns [`RunbookRepositoryError`] when the backend fails.
    fn get_job(&self, job_id: &JobId) -> Result<Option<RemediationJob>, RunbookRepositoryError>;

    /// Lists every known job. Ordering is unspecified.
    ///
    /// # Errors
    /// Returns [`RunbookRepositoryError`] when the backend fails.
    fn list_jobs(&self) -> Result<Vec<RemediationJob>, RunbookRepositoryError>;
}

// ============================================================================
// SECTION: Audit Log
// ============================================================================

/// Errors an [`AuditLog`] implementation may report.
#[derive(Debug, Error)]
pub enum AuditLogError {
    /// The backend failed to complete the operation.
    #[error("audit log backend error: {0}")]
    Backend(String),
}

/// Append-only record of cross-cutting operational events.
pub trait AuditLog: Send + Sync {
    /// Appends one event.
    ///
    /// # Errors
    /// Returns [`AuditLogError`] when the backend fails.
    fn record(&self, event: &TimelineEvent) -> Result<(), AuditLogError>;

    /// Lists every recorded event, in append order.
    ///
    /// # Errors
    /// Returns [`AuditLogError`] when the backend fails.
    fn list(&self) -> Result<Vec<TimelineEvent>, AuditLogError>;
}

// ============================================================================
// SECTION: Integration Bus
// ============================================================================

/// Errors an [`IntegrationBus`] implementation may report.
#[derive(Debug, Error)]
pub enum IntegrationBusError {
    /// The backend failed to complete the operation.
    #[error("integration bus error: {0}")]
    Backend(String),
}

/// Fire-and-forget event publication to external collaborators.
pub trait IntegrationBus: Send + Sync {
    /// Publishes `kind` with the given string payload.
    ///
    /// # Errors
    /// Returns [`IntegrationBusError`] when the backend fails.
    fn publish(
        &self,
        kind: &str,
        payload: &std::collections::BTreeMap<String, String>,
    ) -> Result<(), IntegrationBusError>;
}

// ============================================================================
// SECTION: Health Probe
// ============================================================================

/// Outcome of a single `CheckHealth` probe.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// The probe returned a successful (< 300) status.
    Healthy,
    /// The probe returned a non-success status, or transport failed.
    Degraded,
    /// No `health_url` was configured for the service.
    Unknown,
}

/// Result of probing a service's `health_url`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthReport {
    /// Probed service id.
    pub service_id: ServiceId,
    /// Coarse outcome.
    pub status: HealthStatus,
    /// HTTP status code, when a response was received.
    pub http_status: Option<u16>,
    /// Human-readable detail (truncated response body or error message).
    pub detail: Option<String>,
}

/// Errors a [`HealthProbe`] implementation may report for transport-level
/// failures that are not themselves a `degraded` result (configuration
/// errors only; transport failures map to [`HealthStatus::Degraded`]).
#[derive(Debug, Error)]
pub enum HealthProbeError {
    /// The probe client could not be constructed.
    #[error("health probe client error: {0}")]
    Client(String),
}

/// Outbound HTTP health check.
pub trait HealthProbe: Send + Sync {
    /// Fetches `health_url` with a bounded timeout and classifies the result.
    ///
    /// # Errors
    /// Returns [`HealthProbeError`] only when the probe client itself could
    /// not be built; transport and HTTP-level failures are folded into the
    /// returned [`HealthReport`].
    fn probe(&self, service_id: &ServiceId, health_url: &str) -> Result<HealthReport, HealthProbeError>;
}
