// crates/ops-controller-adapters/src/lib.rs
// ============================================================================
// Module: OpsController Adapters Library
// Description: Public API surface for the in-memory OpsController port
// implementations and the blocking HTTP health prober.
// Purpose: Wire a working default backend without forcing a particular
// external store.
// Dependencies: ops-controller-core, platform-core, reqwest
// ============================================================================

//! ## Overview
//! Every adapter here is process-local (in-memory, behind a lock) except
//! [`health_prober::HttpHealthProbe`], which makes real outbound HTTP calls.
//! None of these are meant to be the only possible backend: every port in
//! `ops-controller-core::interfaces` can be implemented independently.

pub mod audit_log;
pub mod bus;
pub mod health_prober;
pub mod incident_repository;
pub mod log_sink;
pub mod registry;
pub mod runbook_repository;

pub use audit_log::InMemoryAuditLog;
pub use bus::NoopBus;
pub use bus::PublishedEvent;
pub use bus::RecordingBus;
pub use health_prober::HttpHealthProbe;
pub use incident_repository::InMemoryIncidentRepository;
pub use log_sink::InMemoryLogSink;
pub use registry::InMemoryServiceRepository;
pub use runbook_repository::InMemoryRunbookRepository;
