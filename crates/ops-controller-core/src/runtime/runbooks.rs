// crates/ops-controller-core/src/runtime/runbooks.rs
// ============================================================================
// Module: OpsController Runbook Engine
// Description: Register actions; execute and approve remediation jobs under
// cooldown and approval guardrails.
// Purpose: Carry application/runbooks.py's critical path — cooldown takes
// precedence over approval, and a successful execution while an incident is
// `mitigating` auto-advances it to `monitoring`.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! The core does not define concrete remediation actions (spec.md §4.2); an
//! [`ActionDispatcher`] is injected so a real implementation can be plugged
//! in without touching the state machine. The default used by
//! `ops-controller-http` is a simulated no-op, matching the original's
//! `output="noop-executed"`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use platform_core::Clock;
use platform_core::CorrelationId;
use platform_core::Event;
use platform_core::ObservabilityHook;
use platform_core::PlatformError;

use crate::core::ActionId;
use crate::core::IncidentId;
use crate::core::IncidentStatus;
use crate::core::JobId;
use crate::core::OUTPUT_AWAITING_APPROVAL;
use crate::core::OUTPUT_COOLDOWN_IN_EFFECT;
use crate::core::RemediationJob;
use crate::core::RemediationStatus;
use crate::core::RunbookAction;
use crate::core::ServiceId;
use crate::core::TimelineEvent;
use crate::interfaces::AuditLog;
use crate::interfaces::IncidentRepository;
use crate::interfaces::IntegrationBus;
use crate::interfaces::RunbookRepository;
use crate::interfaces::ServiceRepository;

/// Performs the concrete side effect of a runbook action.
///
/// Returns `Ok(output)` on success, `Err(detail)` on failure. The default
/// dispatcher used by the HTTP edge is a simulated no-op.
pub trait ActionDispatcher: Send + Sync {
    /// Executes `job`'s action and returns dispatcher output or an error detail.
    fn dispatch(&self, job: &RemediationJob) -> Result<String, String>;
}

/// Simulated no-op dispatcher, matching the original's MVP execution body.
pub struct NoopDispatcher;

impl ActionDispatcher for NoopDispatcher {
    fn dispatch(&self, _job: &RemediationJob) -> Result<String, String> {
        Ok("noop-executed".to_string())
    }
}

// ============================================================================
// SECTION: Use-Case
// ============================================================================

/// Registers allow-listed actions and runs the execute/approve critical path.
pub struct RunbookUseCase {
    /// Runbook repository port (actions and jobs).
    actions: Arc<dyn RunbookRepository>,
    /// Incident repository port, updated on execution and blocking.
    incidents: Arc<dyn IncidentRepository>,
    /// Service repository, consulted to resolve the acting service.
    services: Arc<dyn ServiceRepository>,
    /// Append-only audit sink.
    audit_log: Arc<dyn AuditLog>,
    /// Integration bus used to publish `runbook.*` events.
    integrations: Arc<dyn IntegrationBus>,
    /// Concrete action dispatcher.
    dispatcher: Arc<dyn ActionDispatcher>,
    /// Clock port used to stamp jobs and timeline events.
    clock: Arc<dyn Clock>,
    /// Observability sink for use-case events.
    hook: Arc<dyn ObservabilityHook>,
}

impl RunbookUseCase {
    /// Builds the use-case over the given ports and dispatcher.
    #[must_use]
    #[allow(clippy::too_many_arguments, reason = "one field per injected port, as ingest.rs does")]
    pub fn new(
        actions: Arc<dyn RunbookRepository>,
        incidents: Arc<dyn IncidentRepository>,
        services: Arc<dyn ServiceRepository>,
        audit_log: Arc<dyn AuditLog>,
        integrations: Arc<dyn IntegrationBus>,
        dispatcher: Arc<dyn ActionDispatcher>,
        clock: Arc<dyn Clock>,
        hook: Arc<dyn ObservabilityHook>,
    ) -> Self {
        Self { actions, incidents, services, audit_log, integrations, dispatcher, clock, hook }
    }

    /// Registers (or replaces) an allow-listed action.
    ///
    /// # Errors
    /// Returns `ErrorKind::External` if the repository fails.
    pub fn register_action(&self, action: RunbookAction) -> Result<RunbookAction, PlatformError> {
        self.actions.add_action(&action).map_err(|err| PlatformError::external(err.to_string()))?;
        Ok(action)
    }

    /// Lists every registered action.
    ///
    /// # Errors
    /// Returns `ErrorKind::External` if the repository fails.
    pub fn list_actions(&self) -> Result<Vec<RunbookAction>, PlatformError> {
        self.actions.list_actions().map_err(|err| PlatformError::external(err.to_string()))
    }

    /// Executes the critical runbook path: resolve → whitelist params →
    /// cooldown check → approval gate → dispatch → update incident → audit.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the service, incident, or action is
    /// unknown; `ErrorKind::Validation` if a param key is not allow-listed;
    /// `ErrorKind::External` if a port fails.
    #[allow(clippy::too_many_arguments, reason = "mirrors the original's explicit keyword call")]
    pub fn execute(
        &self,
        service_id: ServiceId,
        incident_id: IncidentId,
        action_id: ActionId,
        params: BTreeMap<String, String>,
        actor: &str,
        correlation_id: Option<CorrelationId>,
    ) -> Result<RemediationJob, PlatformError> {
        let known_service = self
            .services
            .get(&service_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .is_some();
        if !known_service {
            return Err(PlatformError::not_found(format!("service_id={service_id} not registered")));
        }

        let mut incident = self
            .incidents
            .get(&incident_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .ok_or_else(|| PlatformError::not_found(format!("incident_id={incident_id} not found")))?;

        let action = self
            .actions
            .get_action(&action_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .ok_or_else(|| PlatformError::not_found(format!("action_id={action_id} not allow-listed")))?;

        for key in params.keys() {
            if !action.allowed_params.iter().any(|allowed| allowed == key) {
                return Err(PlatformError::validation(format!(
                    "param {key} not allowed for action {action_id}"
                )));
            }
        }

        let now = self.clock.now();

        if !self.cooldown_ok(&service_id, &action)? {
            let job = RemediationJob {
                id: JobId::generate(),
                incident_id: incident_id.clone(),
                action_id: action_id.clone(),
                service_id,
                params,
                actor: actor.to_string(),
                correlation_id: correlation_id.clone(),
                status: RemediationStatus::Blocked,
                started_at: now,
                finished_at: None,
                output: Some(OUTPUT_COOLDOWN_IN_EFFECT.to_string()),
                error: None,
            };
            self.actions.save_job(&job).map_err(|err| PlatformError::external(err.to_string()))?;
            incident.add_event(TimelineEvent {
                message: format!("Runbook {action_id} blocked by cooldown"),
                actor: actor.to_string(),
                event_type: "runbook_blocked".to_string(),
                timestamp: now,
                correlation_id,
                trace_id: None,
            });
            self.incidents.save(&incident).map_err(|err| PlatformError::external(err.to_string()))?;
            self.record_integration("runbook.cooldown_blocked", &job);
            self.hook.record(Event::ok("ops_controller.runbooks.cooldown_blocked", None));
            return Ok(job);
        }

        if action.requires_approval {
            let job = RemediationJob {
                id: JobId::generate(),
                incident_id: incident_id.clone(),
                action_id: action_id.clone(),
                service_id,
                params,
                actor: actor.to_string(),
                correlation_id: correlation_id.clone(),
                status: RemediationStatus::Blocked,
                started_at: now,
                finished_at: None,
                output: Some(OUTPUT_AWAITING_APPROVAL.to_string()),
                error: None,
            };
            self.actions.save_job(&job).map_err(|err| PlatformError::external(err.to_string()))?;
            incident.add_event(TimelineEvent {
                message: format!("Runbook {action_id} pending approval"),
                actor: actor.to_string(),
                event_type: "runbook_pending".to_string(),
                timestamp: now,
                correlation_id,
                trace_id: None,
            });
            self.incidents.save(&incident).map_err(|err| PlatformError::external(err.to_string()))?;
            self.record_integration("runbook.awaiting_approval", &job);
            self.hook.record(Event::ok("ops_controller.runbooks.awaiting_approval", None));
            return Ok(job);
        }

        let mut job = RemediationJob {
            id: JobId::generate(),
            incident_id: incident_id.clone(),
            action_id: action_id.clone(),
            service_id,
            params,
            actor: actor.to_string(),
            correlation_id: correlation_id.clone(),
            status: RemediationStatus::Pending,
            started_at: now,
            finished_at: None,
            output: None,
            error: None,
        };
        self.run_and_finish(&mut job, &mut incident, actor, correlation_id)?;
        Ok(job)
    }

    /// Approves a job that is `blocked` with `output="awaiting_approval"`,
    /// then runs it.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the job does not exist;
    /// `ErrorKind::Conflict` if it is not awaiting approval;
    /// `ErrorKind::External` if a port fails.
    pub fn approve(&self, job_id: &JobId, approver: &str, note: &str) -> Result<RemediationJob, PlatformError> {
        let mut job = self
            .actions
            .get_job(job_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .ok_or_else(|| PlatformError::not_found(format!("job_id={job_id} not found")))?;

        let awaiting = job.status == RemediationStatus::Blocked
            && job.output.as_deref() == Some(OUTPUT_AWAITING_APPROVAL);
        if !awaiting {
            return Err(PlatformError::conflict("job not awaiting approval"));
        }

        job.mark_started(self.clock.now());
        job.mark_completed(self.clock.now(), Some("approved-noop".to_string()));
        self.actions.save_job(&job).map_err(|err| PlatformError::external(err.to_string()))?;

        if let Some(mut incident) =
            self.incidents.get(&job.incident_id).map_err(|err| PlatformError::external(err.to_string()))?
        {
            incident.add_event(TimelineEvent {
                message: format!("Runbook {} approved by {approver}. {note}", job.action_id),
                actor: approver.to_string(),
                event_type: "runbook_approved".to_string(),
                timestamp: self.clock.now(),
                correlation_id: job.correlation_id.clone(),
                trace_id: None,
            });
            self.incidents.save(&incident).map_err(|err| PlatformError::external(err.to_string()))?;
        }
        self.record_integration("runbook.approved", &job);
        self.hook.record(Event::ok("ops_controller.runbooks.approved", None));
        Ok(job)
    }

    /// Dispatches `job`, updates `incident`'s timeline and auto-advance,
    /// and persists both.
    fn run_and_finish(
        &self,
        job: &mut RemediationJob,
        incident: &mut crate::core::Incident,
        actor: &str,
        correlation_id: Option<CorrelationId>,
    ) -> Result<(), PlatformError> {
        job.mark_started(self.clock.now());
        match self.dispatcher.dispatch(job) {
            Ok(output) => {
                job.mark_completed(self.clock.now(), Some(output));
                self.actions.save_job(job).map_err(|err| PlatformError::external(err.to_string()))?;
                incident.add_event(TimelineEvent {
                    message: format!("Runbook {} executed by {actor}", job.action_id),
                    actor: actor.to_string(),
                    event_type: "runbook_executed".to_string(),
                    timestamp: self.clock.now(),
                    correlation_id,
                    trace_id: None,
                });
                if incident.status == IncidentStatus::Mitigating {
                    incident.status = IncidentStatus::Monitoring;
                }
                self.incidents.save(incident).map_err(|err| PlatformError::external(err.to_string()))?;
                self.record_integration("runbook.executed", job);
            }
            Err(error) => {
                job.mark_failed(self.clock.now(), error);
                self.actions.save_job(job).map_err(|err| PlatformError::external(err.to_string()))?;
            }
        }
        Ok(())
    }

    /// Returns `false` when a prior job for `(service_id, action.id)`
    /// finished within the action's cooldown window.
    fn cooldown_ok(&self, service_id: &ServiceId, action: &RunbookAction) -> Result<bool, PlatformError> {
        if action.cooldown_seconds <= 0 {
            return Ok(true);
        }
        let now = self.clock.now().unix_seconds();
        let jobs = self.actions.list_jobs().map_err(|err| PlatformError::external(err.to_string()))?;
        for job in jobs {
            if &job.service_id != service_id || job.action_id != action.id {
                continue;
            }
            let Some(finished_at) = job.finished_at else {
                continue;
            };
            let elapsed = now - finished_at.unix_seconds();
            if elapsed < action.cooldown_seconds {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn record_integration(&self, kind: &str, job: &RemediationJob) {
        let mut payload = BTreeMap::new();
        payload.insert("job_id".to_string(), job.id.as_str().to_string());
        payload.insert("service_id".to_string(), job.service_id.as_str().to_string());
        payload.insert("incident_id".to_string(), job.incident_id.as_str().to_string());
        payload.insert("action_id".to_string(), job.action_id.as_str().to_string());
        payload.insert("status".to_string(), status_label(job.status).to_string());
        let _ = self.integrations.publish(kind, &payload);
        let _ = self.audit_log.record(&TimelineEvent {
            message: format!("{kind} for job {}", job.id),
            actor: "system".to_string(),
            event_type: kind.to_string(),
            timestamp: self.clock.now(),
            correlation_id: job.correlation_id.clone(),
            trace_id: None,
        });
    }
}

/// Wire label for a [`RemediationStatus`].
const fn status_label(status: RemediationStatus) -> &'static str {
    match status {
        RemediationStatus::Pending => "pending",
        RemediationStatus::Running => "running",
        RemediationStatus::Completed => "completed",
        RemediationStatus::Failed => "failed",
        RemediationStatus::Blocked => "blocked",
    }
}
