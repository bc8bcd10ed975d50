// crates/ops-controller-http/src/state.rs
// ============================================================================
// Module: OpsController Server State
// Description: Shared state constructed once at process start and handed to
// every handler via axum's State extractor.
// Purpose: Explicit constructor wiring in place of decorator-based DI.
// Dependencies: ops-controller-core, ops-controller-adapters, platform-core
// ============================================================================

//! ## Overview
//! `AppState` owns the use-cases, not the adapters directly; handlers only
//! ever call through `registry`, `logs`, `health`, `incidents`, and
//! `runbooks`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use ops_controller_adapters::HttpHealthProbe;
use ops_controller_adapters::InMemoryAuditLog;
use ops_controller_adapters::InMemoryIncidentRepository;
use ops_controller_adapters::InMemoryLogSink;
use ops_controller_adapters::InMemoryRunbookRepository;
use ops_controller_adapters::InMemoryServiceRepository;
use ops_controller_adapters::NoopBus;
use ops_controller_core::AuditLog;
use ops_controller_core::HealthProbe;
use ops_controller_core::HealthUseCase;
use ops_controller_core::IncidentRepository;
use ops_controller_core::IncidentUseCase;
use ops_controller_core::IntegrationBus;
use ops_controller_core::LogSink;
use ops_controller_core::LogUseCase;
use ops_controller_core::NoopDispatcher;
use ops_controller_core::RunbookRepository;
use ops_controller_core::RunbookUseCase;
use ops_controller_core::ServiceRegistry;
use ops_controller_core::ServiceRepository;
use platform_core::Clock;
use platform_core::NoopHook;
use platform_core::ObservabilityHook;
use platform_core::SystemClock;

use crate::config::Config;

/// Shared server state for OpsController HTTP handlers.
pub struct AppState {
    /// Optional shared-secret required on `X-API-Key` for non-health routes.
    pub api_key: Option<String>,
    /// Service registry use-case.
    pub registry: ServiceRegistry,
    /// Log ingestion/search use-case.
    pub logs: LogUseCase,
    /// Health-check use-case.
    pub health: HealthUseCase,
    /// Incident state-machine use-case.
    pub incidents: IncidentUseCase,
    /// Runbook execute/approve use-case.
    pub runbooks: RunbookUseCase,
    /// Direct audit-log access for `GET /metrics`.
    pub audit_log: Arc<dyn AuditLog>,
    /// Direct runbook-repository access for `GET /metrics`.
    pub runbook_repository: Arc<dyn RunbookRepository>,
}

impl AppState {
    /// Wires the in-memory adapters into the use-cases.
    ///
    /// # Errors
    /// Returns a message if the health-probe HTTP client could not be built.
    pub fn new(config: &Config) -> Result<Self, String> {
        let services: Arc<dyn ServiceRepository> = Arc::new(InMemoryServiceRepository::new());
        let log_sink: Arc<dyn LogSink> = Arc::new(InMemoryLogSink::new());
        let incidents: Arc<dyn IncidentRepository> = Arc::new(InMemoryIncidentRepository::new());
        let runbook_repository: Arc<dyn RunbookRepository> = Arc::new(InMemoryRunbookRepository::new());
        let audit_log: Arc<dyn AuditLog> = Arc::new(InMemoryAuditLog::new());
        let integrations: Arc<dyn IntegrationBus> = Arc::new(NoopBus);
        let health_probe: Arc<dyn HealthProbe> =
            Arc::new(HttpHealthProbe::new().map_err(|err| err.to_string())?);
        let clock = Arc::new(SystemClock);
        let hook = Arc::new(NoopHook);

        Ok(Self {
            api_key: config.api_key.clone(),
            registry: ServiceRegistry::new(
                Arc::clone(&services),
                Arc::clone(&audit_log),
                Arc::clone(&integrations),
                Arc::clone(&clock) as Arc<dyn Clock>,
                Arc::clone(&hook) as Arc<dyn ObservabilityHook>,
            ),
            logs: LogUseCase::new(
                Arc::clone(&log_sink),
                Arc::clone(&services),
                Arc::clone(&audit_log),
                Arc::clone(&integrations),
                Arc::clone(&clock) as Arc<dyn Clock>,
                Arc::clone(&hook) as Arc<dyn ObservabilityHook>,
            ),
            health: HealthUseCase::new(
                Arc::clone(&services),
                health_probe,
                Arc::clone(&hook) as Arc<dyn ObservabilityHook>,
            ),
            incidents: IncidentUseCase::new(
                Arc::clone(&incidents),
                Arc::clone(&services),
                Arc::clone(&audit_log),
                Arc::clone(&integrations),
                Arc::clone(&clock) as Arc<dyn Clock>,
                Arc::clone(&hook) as Arc<dyn ObservabilityHook>,
            ),
            runbooks: RunbookUseCase::new(
                Arc::clone(&runbook_repository),
                Arc::clone(&incidents),
                Arc::clone(&services),
                Arc::clone(&audit_log),
                Arc::clone(&integrations),
                Arc::new(NoopDispatcher),
                Arc::clone(&clock) as Arc<dyn Clock>,
                Arc::clone(&hook) as Arc<dyn ObservabilityHook>,
            ),
            audit_log,
            runbook_repository,
        })
    }
}
