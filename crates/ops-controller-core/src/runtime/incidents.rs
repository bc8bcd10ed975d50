// crates/ops-controller-core/src/runtime/incidents.rs
// ============================================================================
// Module: OpsController Incident Use-Case
// Description: Open, transition, and annotate incidents.
// Purpose: Mirror application/incidents.py's create/transition/timeline
// operations over the incident repository, audit log, and integration bus.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! `Transition` is intentionally unconstrained (spec.md §4.2): any state may
//! move to any other state here. `ExecuteRunbook`'s side-channel
//! `mitigating -> monitoring` auto-advance lives in [`crate::runtime::runbooks`],
//! not here, since it is not a caller-initiated transition.

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
use platform_core::Severity;

use crate::core::Incident;
use crate::core::IncidentId;
use crate::core::IncidentStatus;
use crate::core::Signal;
use crate::core::TimelineEvent;
use crate::interfaces::AuditLog;
use crate::interfaces::IncidentRepository;
use crate::interfaces::IntegrationBus;
use crate::interfaces::ServiceRepository;

// ============================================================================
// SECTION: Use-Case
// ============================================================================

/// Opens, transitions, and annotates incidents.
pub struct IncidentUseCase {
    /// Incident repository port.
    incidents: Arc<dyn IncidentRepository>,
    /// Service repository, consulted to reject incidents for unregistered
    /// services.
    services: Arc<dyn ServiceRepository>,
    /// Append-only audit sink.
    audit_log: Arc<dyn AuditLog>,
    /// Integration bus used to publish `incident.*` events.
    integrations: Arc<dyn IntegrationBus>,
    /// Clock port used to stamp incidents and timeline events.
    clock: Arc<dyn Clock>,
    /// Observability sink for use-case events.
    hook: Arc<dyn ObservabilityHook>,
}

impl IncidentUseCase {
    /// Builds the use-case over the given ports.
    #[must_use]
    pub fn new(
        incidents: Arc<dyn IncidentRepository>,
        services: Arc<dyn ServiceRepository>,
        audit_log: Arc<dyn AuditLog>,
        integrations: Arc<dyn IntegrationBus>,
        clock: Arc<dyn Clock>,
        hook: Arc<dyn ObservabilityHook>,
    ) -> Self {
        Self { incidents, services, audit_log, integrations, clock, hook }
    }

    /// Opens a manually reported incident.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if `service_id` is not registered, or
    /// `ErrorKind::External` if a repository fails.
    #[allow(clippy::too_many_arguments, reason = "mirrors the original's explicit keyword call")]
    pub fn open_manual(
        &self,
        service_id: crate::core::ServiceId,
        severity: Severity,
        summary: String,
        actor: &str,
        correlation_id: Option<CorrelationId>,
        trace_id: Option<String>,
    ) -> Result<Incident, PlatformError> {
        self.ensure_service(&service_id)?;
        let now = self.clock.now();
        let mut incident = Incident {
            id: IncidentId::generate(),
            service_id,
            severity,
            status: IncidentStatus::Open,
            summary: summary.clone(),
            signals: Vec::new(),
            timeline: Vec::new(),
            runbook_refs: Vec::new(),
            created_at: now,
            updated_at: now,
            correlation_id: correlation_id.clone(),
        };
        incident.add_event(TimelineEvent {
            message: format!("Incident opened: {summary}"),
            actor: actor.to_string(),
            event_type: "opened".to_string(),
            timestamp: now,
            correlation_id,
            trace_id,
        });
        self.incidents.save(&incident).map_err(|err| PlatformError::external(err.to_string()))?;
        self.record_integration("incident.opened", &incident);
        self.hook.record(Event::ok("ops_controller.incidents.open_manual", None));
        Ok(incident)
    }

    /// Opens an incident from an inbound [`Signal`], attaching the signal.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the signal's service is not
    /// registered, or `ErrorKind::External` if a repository fails.
    pub fn open_from_signal(&self, signal: Signal, actor: &str) -> Result<Incident, PlatformError> {
        self.ensure_service(&signal.service_id)?;
        let now = self.clock.now();
        let mut incident = Incident {
            id: IncidentId::generate(),
            service_id: signal.service_id.clone(),
            severity: signal.severity,
            status: IncidentStatus::Open,
            summary: signal.message.clone(),
            signals: Vec::new(),
            timeline: Vec::new(),
            runbook_refs: Vec::new(),
            created_at: now,
            updated_at: now,
            correlation_id: signal.correlation_id.clone(),
        };
        incident.add_signal(signal.clone(), now);
        incident.add_event(TimelineEvent {
            message: format!("Incident created from signal: {}", signal.message),
            actor: actor.to_string(),
            event_type: "signal".to_string(),
            timestamp: now,
            correlation_id: signal.correlation_id,
            trace_id: signal.trace_id,
        });
        self.incidents.save(&incident).map_err(|err| PlatformError::external(err.to_string()))?;
        self.record_integration("incident.signal", &incident);
        self.hook.record(Event::ok("ops_controller.incidents.open_from_signal", None));
        Ok(incident)
    }

    /// Transitions an incident to `status`, appending a timeline event.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the incident does not exist, or
    /// `ErrorKind::External` if the repository fails.
    pub fn transition(
        &self,
        incident_id: &IncidentId,
        status: IncidentStatus,
        actor: &str,
        note: &str,
    ) -> Result<Incident, PlatformError> {
        let mut incident = self.get(incident_id)?;
        incident.status = status;
        let now = self.clock.now();
        let correlation_id = incident.correlation_id.clone();
        incident.add_event(TimelineEvent {
            message: format!("Status changed to {}. {note}", status_label(status)),
            actor: actor.to_string(),
            event_type: "status_change".to_string(),
            timestamp: now,
            correlation_id,
            trace_id: None,
        });
        self.incidents.save(&incident).map_err(|err| PlatformError::external(err.to_string()))?;
        self.record_integration("incident.status", &incident);
        self.hook.record(Event::ok("ops_controller.incidents.transition", None));
        Ok(incident)
    }

    /// Appends `event` to `incident_id`'s timeline.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the incident does not exist, or
    /// `ErrorKind::External` if the repository fails.
    pub fn add_timeline(
        &self,
        incident_id: &IncidentId,
        event: TimelineEvent,
    ) -> Result<Incident, PlatformError> {
        let mut incident = self.get(incident_id)?;
        incident.add_event(event);
        self.incidents.save(&incident).map_err(|err| PlatformError::external(err.to_string()))?;
        Ok(incident)
    }

    /// Lists every known incident.
    ///
    /// # Errors
    /// Returns `ErrorKind::External` if the repository fails.
    pub fn list(&self) -> Result<Vec<Incident>, PlatformError> {
        self.incidents.list().map_err(|err| PlatformError::external(err.to_string()))
    }

    /// Looks up an incident by id.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the incident does not exist, or
    /// `ErrorKind::External` if the repository fails.
    pub fn get(&self, incident_id: &IncidentId) -> Result<Incident, PlatformError> {
        self.incidents
            .get(incident_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .ok_or_else(|| PlatformError::not_found(format!("incident_id={incident_id} not found")))
    }

    fn ensure_service(&self, service_id: &crate::core::ServiceId) -> Result<(), PlatformError> {
        let known = self
            .services
            .get(service_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .is_some();
        if known {
            Ok(())
        } else {
            Err(PlatformError::not_found(format!("service_id={service_id} not registered")))
        }
    }

    fn record_integration(&self, kind: &str, incident: &Incident) {
        let mut payload = BTreeMap::new();
        payload.insert("incident_id".to_string(), incident.id.as_str().to_string());
        payload.insert("service_id".to_string(), incident.service_id.as_str().to_string());
        payload.insert("status".to_string(), status_label(incident.status).to_string());
        let _ = self.integrations.publish(kind, &payload);
        let _ = self.audit_log.record(&TimelineEvent {
            message: format!("{kind} for incident {}", incident.id),
            actor: "system".to_string(),
            event_type: kind.to_string(),
            timestamp: self.clock.now(),
            correlation_id: incident.correlation_id.clone(),
            trace_id: None,
        });
    }
}

/// Wire label for an [`IncidentStatus`].
const fn status_label(status: IncidentStatus) -> &'static str {
    match status {
        IncidentStatus::Open => "open",
        IncidentStatus::Mitigating => "mitigating",
        IncidentStatus::Monitoring => "monitoring",
        IncidentStatus::Resolved => "resolved",
    }
}
