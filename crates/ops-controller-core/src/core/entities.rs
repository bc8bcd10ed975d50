// crates/ops-controller-core/src/core/entities.rs
// ============================================================================
// Module: OpsController Entities
// Description: Service registry, signal/incident state machine, and runbook
// remediation domain types.
// Purpose: Carry the invariants named in spec.md §3/§4.2 in the type system.
// Dependencies: platform-core, serde
// ============================================================================

//! ## Overview
//! `Incident::add_event` and `Incident::add_signal` are the only ways to
//! grow a timeline or signal list, keeping both append-only and keeping
//! `updated_at` synchronized with the latest timeline entry as required by
//! spec.md §3's `updated_at = max(timeline.ts)` invariant.
//! `RemediationJob`'s `mark_*` transitions are the only way to leave
//! `Pending`/`Running`, preventing re-entry into a terminal state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use platform_core::CorrelationId;
use platform_core::Severity;
use platform_core::Timestamp;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ActionId;
use crate::core::identifiers::IncidentId;
use crate::core::identifiers::JobId;
use crate::core::identifiers::ServiceId;

// ============================================================================
// SECTION: Service Registry
// ============================================================================

/// Deployment environment a service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// Production traffic.
    Prod,
    /// Staging / pre-production traffic.
    Staging,
    /// Local or developer-only environment.
    Dev,
    /// Anything not covered by the above.
    Other,
}

impl Environment {
    /// Returns the canonical lowercase label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Staging => "staging",
            Self::Dev => "dev",
            Self::Other => "other",
        }
    }
}

/// A registered service the controller can alert on and probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Caller-chosen stable id.
    pub id: ServiceId,
    /// Human-readable name.
    pub name: String,
    /// Deployment environment.
    pub env: Environment,
    /// Owning team or individual identifiers.
    pub owners: Vec<String>,
    /// Endpoint probed by `CheckHealth`, when configured.
    pub health_url: Option<String>,
    /// Endpoint logs are shipped to, when configured (adapter-specific).
    pub logging_endpoint: Option<String>,
    /// Free-form labels.
    pub tags: Vec<String>,
    /// OpenTelemetry resource attributes.
    pub otel_config: BTreeMap<String, String>,
    /// Arbitrary caller metadata.
    pub metadata: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Signals
// ============================================================================

/// Kind of signal that can open or attach to an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalType {
    /// A log line matched an alerting rule.
    Log,
    /// A metric crossed a threshold.
    Metric,
    /// A health probe reported degradation.
    Health,
    /// An externally raised alert.
    Alert,
}

/// An observation about a service, severity-scored by its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// The service this signal concerns.
    pub service_id: ServiceId,
    /// Kind of signal.
    #[serde(rename = "type")]
    pub kind: SignalType,
    /// Human-readable description.
    pub message: String,
    /// Severity assigned by the source.
    pub severity: Severity,
    /// Distributed trace id, when available.
    pub trace_id: Option<String>,
    /// Correlation id propagated from the triggering request.
    pub correlation_id: Option<CorrelationId>,
    /// When the signal was observed.
    pub timestamp: Timestamp,
    /// Source-specific key/value attributes.
    pub attributes: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Incidents
// ============================================================================

/// Incident lifecycle state.
///
/// # Invariants
/// - Transitions are unconstrained in the forward direction and to
///   [`IncidentStatus::Resolved`] from any state (see spec.md §4.2); the
///   type itself does not enforce ordering, the use-case layer does not
///   either, per the explicit "unconstrained" contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncidentStatus {
    /// Newly opened, no mitigation yet.
    Open,
    /// Actively being mitigated.
    Mitigating,
    /// Mitigated, under observation.
    Monitoring,
    /// Closed.
    Resolved,
}

/// One append-only timeline entry on an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Human-readable description of what happened.
    pub message: String,
    /// Who or what caused the event.
    pub actor: String,
    /// Machine-readable event kind, e.g. `"runbook_executed"`.
    pub event_type: String,
    /// When the event occurred.
    pub timestamp: Timestamp,
    /// Correlation id propagated from the triggering request.
    pub correlation_id: Option<CorrelationId>,
    /// Distributed trace id, when available.
    pub trace_id: Option<String>,
}

/// A tracked operational incident for a service.
///
/// # Invariants
/// - `timeline` is append-only; only [`Incident::add_event`] may grow it.
/// - `updated_at` always equals the timestamp of the most recent timeline
///   entry once any event has been appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Generated incident id.
    pub id: IncidentId,
    /// The service this incident concerns.
    pub service_id: ServiceId,
    /// Current severity.
    pub severity: Severity,
    /// Current lifecycle state.
    pub status: IncidentStatus,
    /// Human-readable summary.
    pub summary: String,
    /// Signals attached to this incident.
    pub signals: Vec<Signal>,
    /// Append-only history of what happened.
    pub timeline: Vec<TimelineEvent>,
    /// Ids of runbook actions referenced while handling this incident.
    pub runbook_refs: Vec<String>,
    /// When the incident was created.
    pub created_at: Timestamp,
    /// When the incident was last touched.
    pub updated_at: Timestamp,
    /// Correlation id propagated from the triggering request.
    pub correlation_id: Option<CorrelationId>,
}

impl Incident {
    /// Appends a timeline event and advances `updated_at` to its timestamp.
    pub fn add_event(&mut self, event: TimelineEvent) {
        self.updated_at = event.timestamp;
        self.timeline.push(event);
    }

    /// Attaches a signal and bumps `updated_at` to `now`.
    pub fn add_signal(&mut self, signal: Signal, now: Timestamp) {
        self.signals.push(signal);
        self.updated_at = now;
    }
}

// ============================================================================
// SECTION: Runbooks
// ============================================================================

/// An allow-listed remediation action the controller may execute.
///
/// # Invariants
/// - `allowed_params` is an exhaustive whitelist; any other key is rejected
///   by the runbook use-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunbookAction {
    /// Caller-chosen stable id.
    pub id: ActionId,
    /// Human-readable name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Exhaustive whitelist of accepted parameter keys.
    pub allowed_params: Vec<String>,
    /// Minimum seconds between completed executions of this action for the
    /// same service, zero disables the check.
    pub cooldown_seconds: i64,
    /// Whether execution must be approved before it runs.
    pub requires_approval: bool,
    /// Free-form operational guardrail metadata.
    pub guardrails: BTreeMap<String, String>,
}

/// Lifecycle state of a [`RemediationJob`].
///
/// # Invariants
/// - `Completed`, `Failed`, and `Blocked` are terminal; no method in this
///   crate transitions out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemediationStatus {
    /// Created, not yet started.
    Pending,
    /// Executing.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
    /// Did not run: blocked by cooldown or awaiting approval.
    Blocked,
}

/// Sentinel output recorded when a job is blocked by cooldown.
pub const OUTPUT_COOLDOWN_IN_EFFECT: &str = "cooldown_in_effect";
/// Sentinel output recorded when a job awaits approval.
pub const OUTPUT_AWAITING_APPROVAL: &str = "awaiting_approval";

/// A single execution (or blocked attempt) of a [`RunbookAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationJob {
    /// Generated job id.
    pub id: JobId,
    /// The incident this job was executed for.
    pub incident_id: IncidentId,
    /// The action that was executed.
    pub action_id: ActionId,
    /// The service the action targets.
    pub service_id: ServiceId,
    /// Parameters supplied by the caller, already validated against the
    /// action's whitelist.
    pub params: BTreeMap<String, String>,
    /// Who requested the execution.
    pub actor: String,
    /// Correlation id propagated from the triggering request.
    pub correlation_id: Option<CorrelationId>,
    /// Current lifecycle state.
    pub status: RemediationStatus,
    /// When the job was created.
    pub started_at: Timestamp,
    /// When the job reached a terminal state, if it has.
    pub finished_at: Option<Timestamp>,
    /// Dispatcher output on success, or a sentinel on block.
    pub output: Option<String>,
    /// Error detail on failure.
    pub error: Option<String>,
}

impl RemediationJob {
    /// Transitions the job to [`RemediationStatus::Running`].
    pub fn mark_started(&mut self, now: Timestamp) {
        self.status = RemediationStatus::Running;
        self.started_at = now;
    }

    /// Transitions the job to [`RemediationStatus::Completed`].
    pub fn mark_completed(&mut self, now: Timestamp, output: Option<String>) {
        self.status = RemediationStatus::Completed;
        self.finished_at = Some(now);
        self.output = output;
    }

    /// Transitions the job to [`RemediationStatus::Failed`].
    pub fn mark_failed(&mut self, now: Timestamp, error: String) {
        self.status = RemediationStatus::Failed;
        self.finished_at = Some(now);
        self.error = Some(error);
    }
}

// ============================================================================
// SECTION: Logs
// ============================================================================

/// A single structured log line ingested for a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// The service this record was emitted by.
    pub service_id: ServiceId,
    /// Deployment environment label, when supplied.
    pub env: Option<String>,
    /// Log level, when supplied.
    pub level: Option<String>,
    /// Log message body.
    pub message: String,
    /// Distributed trace id, when available.
    pub trace_id: Option<String>,
    /// Correlation id propagated from the triggering request.
    pub correlation_id: Option<CorrelationId>,
    /// Container or process name that emitted the record.
    pub container_name: Option<String>,
    /// Additional structured fields.
    pub extra: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use platform_core::Severity;
    use platform_core::Timestamp;

    use super::Incident;
    use super::IncidentId;
    use super::IncidentStatus;
    use super::ServiceId;
    use super::TimelineEvent;

    fn sample_incident(created_at: Timestamp) -> Incident {
        Incident {
            id: IncidentId::generate(),
            service_id: ServiceId::new("svc-1"),
            severity: Severity::High,
            status: IncidentStatus::Open,
            summary: "disk usage critical".to_string(),
            signals: Vec::new(),
            timeline: Vec::new(),
            runbook_refs: Vec::new(),
            created_at,
            updated_at: created_at,
            correlation_id: None,
        }
    }

    #[test]
    fn add_event_advances_updated_at_to_event_timestamp() {
        let t0 = Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("valid rfc3339");
        let t1 = Timestamp::parse_rfc3339("2026-01-01T00:05:00Z").expect("valid rfc3339");
        let mut incident = sample_incident(t0);
        incident.add_event(TimelineEvent {
            message: "opened".to_string(),
            actor: "system".to_string(),
            event_type: "opened".to_string(),
            timestamp: t1,
            correlation_id: None,
            trace_id: None,
        });
        assert_eq!(incident.updated_at, t1);
        assert_eq!(incident.timeline.len(), 1);
    }
}
