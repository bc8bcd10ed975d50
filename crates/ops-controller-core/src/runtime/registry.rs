// crates/ops-controller-core/src/runtime/registry.rs
// ============================================================================
// Module: OpsController Service Registry
// Description: Register, list, and look up services.
// Purpose: Orchestrate the registry use-case over the service repository,
// audit log, and integration bus ports.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! `Register` upserts by `service.id` and emits `service.registered` on the
//! integration bus and audit log, matching `application/service_registry.py`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use platform_core::Clock;
use platform_core::Event;
use platform_core::ObservabilityHook;
use platform_core::PlatformError;

use crate::core::Service;
use crate::core::ServiceId;
use crate::interfaces::AuditLog;
use crate::interfaces::IntegrationBus;
use crate::interfaces::ServiceRepository;

// ============================================================================
// SECTION: Use-Case
// ============================================================================

/// Registers and looks up services.
pub struct ServiceRegistry {
    /// Repository port backing service persistence.
    repository: Arc<dyn ServiceRepository>,
    /// Append-only audit sink, consulted on every registration.
    audit_log: Arc<dyn AuditLog>,
    /// Integration bus used to publish `service.registered`.
    integrations: Arc<dyn IntegrationBus>,
    /// Clock port used to stamp the audit event.
    clock: Arc<dyn Clock>,
    /// Observability sink for use-case events.
    hook: Arc<dyn ObservabilityHook>,
}

impl ServiceRegistry {
    /// Builds the use-case over the given ports.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ServiceRepository>,
        audit_log: Arc<dyn AuditLog>,
        integrations: Arc<dyn IntegrationBus>,
        clock: Arc<dyn Clock>,
        hook: Arc<dyn ObservabilityHook>,
    ) -> Self {
        Self { repository, audit_log, integrations, clock, hook }
    }

    /// Upserts `service`, then emits an audit event and an integration
    /// publication.
    ///
    /// # Errors
    /// Returns a [`PlatformError`] when the repository fails.
    pub fn register(&self, service: Service) -> Result<Service, PlatformError> {
        self.repository.upsert(&service).map_err(|err| PlatformError::external(err.to_string()))?;

        let _ = self.audit_log.record(&crate::core::TimelineEvent {
            message: format!("service registered: {}", service.id),
            actor: "system".to_string(),
            event_type: "service_registered".to_string(),
            timestamp: self.clock.now(),
            correlation_id: None,
            trace_id: None,
        });
        let mut payload = BTreeMap::new();
        payload.insert("service_id".to_string(), service.id.as_str().to_string());
        payload.insert("env".to_string(), service.env.as_str().to_string());
        let _ = self.integrations.publish("service.registered", &payload);

        self.hook.record(Event::ok("ops_controller.registry.register", None));
        Ok(service)
    }

    /// Lists every registered service.
    ///
    /// # Errors
    /// Returns a [`PlatformError`] when the repository fails.
    pub fn list(&self) -> Result<Vec<Service>, PlatformError> {
        self.repository.list().map_err(|err| PlatformError::external(err.to_string()))
    }

    /// Looks up a service by id.
    ///
    /// # Errors
    /// Returns a [`PlatformError`] when the repository fails.
    pub fn get(&self, service_id: &ServiceId) -> Result<Option<Service>, PlatformError> {
        self.repository.get(service_id).map_err(|err| PlatformError::external(err.to_string()))
    }
}
