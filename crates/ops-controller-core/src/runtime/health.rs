// crates/ops-controller-core/src/runtime/health.rs
// ============================================================================
// Module: OpsController Health Check
// Description: Resolve a service's health_url and classify a probe result.
// Purpose: Mirror application/health.py's status mapping.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! `CheckHealth` itself never fails on transport errors: those are folded
//! into `HealthStatus::Degraded`, per spec.md §4.2. It fails only when the
//! service is not registered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use platform_core::Event;
use platform_core::ObservabilityHook;
use platform_core::PlatformError;

use crate::core::ServiceId;
use crate::interfaces::HealthProbe;
use crate::interfaces::HealthReport;
use crate::interfaces::HealthStatus;
use crate::interfaces::ServiceRepository;

// ============================================================================
// SECTION: Use-Case
// ============================================================================

/// Checks a registered service's health endpoint.
pub struct HealthUseCase {
    /// Service repository, consulted to look up `health_url`.
    services: Arc<dyn ServiceRepository>,
    /// Outbound HTTP probe port.
    probe: Arc<dyn HealthProbe>,
    /// Observability sink for use-case events.
    hook: Arc<dyn ObservabilityHook>,
}

impl HealthUseCase {
    /// Builds the use-case over the given ports.
    #[must_use]
    pub fn new(
        services: Arc<dyn ServiceRepository>,
        probe: Arc<dyn HealthProbe>,
        hook: Arc<dyn ObservabilityHook>,
    ) -> Self {
        Self { services, probe, hook }
    }

    /// Checks `service_id`'s health.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the service is not registered, or
    /// `ErrorKind::External` if the probe client could not be constructed.
    pub fn check(&self, service_id: &ServiceId) -> Result<HealthReport, PlatformError> {
        let service = self
            .services
            .get(service_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .ok_or_else(|| PlatformError::not_found(format!("service_id={service_id} not registered")))?;

        let Some(health_url) = service.health_url.as_deref() else {
            self.hook.record(Event::ok("ops_controller.health.unknown", None));
            return Ok(HealthReport {
                service_id: service_id.clone(),
                status: HealthStatus::Unknown,
                http_status: None,
                detail: Some("health_url not configured".to_string()),
            });
        };

        let report = self
            .probe
            .probe(service_id, health_url)
            .map_err(|err| PlatformError::external(err.to_string()))?;
        self.hook.record(Event::ok("ops_controller.health.check", None));
        Ok(report)
    }
}
