// crates/ops-controller-core/src/core/mod.rs
// ============================================================================
// Module: OpsController Domain
// Description: Flat re-export surface over entities and identifiers.
// Purpose: Let callers write `ops_controller_core::Service` instead of
// reaching into submodules.
// Dependencies: none
// ============================================================================

pub mod entities;
pub mod identifiers;

pub use entities::Environment;
pub use entities::Incident;
pub use entities::IncidentStatus;
pub use entities::LogRecord;
pub use entities::OUTPUT_AWAITING_APPROVAL;
pub use entities::OUTPUT_COOLDOWN_IN_EFFECT;
pub use entities::RemediationJob;
pub use entities::RemediationStatus;
pub use entities::RunbookAction;
pub use entities::Service;
pub use entities::Signal;
pub use entities::SignalType;
pub use entities::TimelineEvent;
pub use identifiers::ActionId;
pub use identifiers::IncidentId;
pub use identifiers::JobId;
pub use identifiers::ServiceId;
