// crates/ops-controller-core/src/runtime/logs.rs
// ============================================================================
// Module: OpsController Log Ingestion
// Description: Ingest and search structured log records for registered
// services.
// Purpose: Enforce the `UnknownService` guard named in spec.md §4.2 before
// any log record reaches the sink.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! Mirrors `application/logs.py`: ingestion fails closed when the service
//! is not registered; search has no such guard (filters are all optional).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use platform_core::Clock;
use platform_core::Event;
use platform_core::ObservabilityHook;
use platform_core::PlatformError;

use crate::core::LogRecord;
use crate::core::TimelineEvent;
use crate::interfaces::AuditLog;
use crate::interfaces::IntegrationBus;
use crate::interfaces::LogFilter;
use crate::interfaces::LogSink;
use crate::interfaces::ServiceRepository;

// ============================================================================
// SECTION: Use-Case
// ============================================================================

/// Ingests and searches log records on behalf of registered services.
pub struct LogUseCase {
    /// Append-only log storage port.
    sink: Arc<dyn LogSink>,
    /// Service repository, consulted to reject logs for unregistered services.
    services: Arc<dyn ServiceRepository>,
    /// Append-only audit sink.
    audit_log: Arc<dyn AuditLog>,
    /// Integration bus used to publish `logs.ingested`.
    integrations: Arc<dyn IntegrationBus>,
    /// Clock port used to stamp the audit event.
    clock: Arc<dyn Clock>,
    /// Observability sink for use-case events.
    hook: Arc<dyn ObservabilityHook>,
}

impl LogUseCase {
    /// Builds the use-case over the given ports.
    #[must_use]
    pub fn new(
        sink: Arc<dyn LogSink>,
        services: Arc<dyn ServiceRepository>,
        audit_log: Arc<dyn AuditLog>,
        integrations: Arc<dyn IntegrationBus>,
        clock: Arc<dyn Clock>,
        hook: Arc<dyn ObservabilityHook>,
    ) -> Self {
        Self { sink, services, audit_log, integrations, clock, hook }
    }

    /// Ingests `record`, after confirming `record.service_id` is registered.
    ///
    /// # Errors
    /// Returns `ErrorKind::NotFound` if the service is not registered, or
    /// `ErrorKind::External` if the sink fails.
    pub fn ingest(&self, record: LogRecord) -> Result<(), PlatformError> {
        let known = self
            .services
            .get(&record.service_id)
            .map_err(|err| PlatformError::external(err.to_string()))?
            .is_some();
        if !known {
            return Err(PlatformError::not_found(format!(
                "service_id={} not registered",
                record.service_id
            )));
        }

        self.sink.ingest(&record).map_err(|err| PlatformError::external(err.to_string()))?;

        let _ = self.audit_log.record(&TimelineEvent {
            message: format!("log ingested for {}", record.service_id),
            actor: "system".to_string(),
            event_type: "log_ingested".to_string(),
            timestamp: self.clock.now(),
            correlation_id: record.correlation_id.clone(),
            trace_id: record.trace_id.clone(),
        });
        let mut payload = BTreeMap::new();
        payload.insert("service_id".to_string(), record.service_id.as_str().to_string());
        payload.insert("trace_id".to_string(), record.trace_id.clone().unwrap_or_default());
        payload.insert(
            "correlation_id".to_string(),
            record.correlation_id.as_ref().map(ToString::to_string).unwrap_or_default(),
        );
        let _ = self.integrations.publish("logs.ingested", &payload);

        self.hook.record(Event::ok("ops_controller.logs.ingest", None));
        Ok(())
    }

    /// Searches the log sink with the given filter.
    ///
    /// # Errors
    /// Returns `ErrorKind::External` if the sink fails.
    pub fn search(&self, filter: &LogFilter) -> Result<Vec<LogRecord>, PlatformError> {
        self.sink.search(filter).map_err(|err| PlatformError::external(err.to_string()))
    }
}
