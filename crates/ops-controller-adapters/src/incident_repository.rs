// crates/ops-controller-adapters/src/incident_repository.rs
// ============================================================================
// Module: In-Memory Incident Repository
// Description: Default IncidentRepository adapter backed by a process-local
// map.
// Purpose: Ship a working backend with no external dependency.
// Dependencies: ops-controller-core, std::sync
// ============================================================================

use std::collections::HashMap;
use std::sync::RwLock;

use ops_controller_core::Incident;
use ops_controller_core::IncidentId;
use ops_controller_core::IncidentRepository;
use ops_controller_core::IncidentRepositoryError;

/// Process-local, in-memory [`IncidentRepository`] implementation.
#[derive(Default)]
pub struct InMemoryIncidentRepository {
    /// Incidents keyed by their id.
    incidents: RwLock<HashMap<IncidentId, Incident>>,
}

impl InMemoryIncidentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IncidentRepository for InMemoryIncidentRepository {
    fn save(&self, incident: &Incident) -> Result<(), IncidentRepositoryError> {
        let mut incidents = self.incidents.write().map_err(|_| lock_poisoned())?;
        incidents.insert(incident.id.clone(), incident.clone());
        Ok(())
    }

    fn get(&self, incident_id: &IncidentId) -> Result<Option<Incident>, IncidentRepositoryError> {
        let incidents = self.incidents.read().map_err(|_| lock_poisoned())?;
        Ok(incidents.get(incident_id).cloned())
    }

    fn list(&self) -> Result<Vec<Incident>, IncidentRepositoryError> {
        let incidents = self.incidents.read().map_err(|_| lock_poisoned())?;
        Ok(incidents.values().cloned().collect())
    }
}

fn lock_poisoned() -> IncidentRepositoryError {
    IncidentRepositoryError::Backend("in-memory incident repository lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use ops_controller_core::Incident;
    use ops_controller_core::IncidentId;
    use ops_controller_core::IncidentStatus;
    use ops_controller_core::ServiceId;
    use platform_core::Severity;
    use platform_core::Timestamp;

    use super::InMemoryIncidentRepository;
    use super::IncidentRepository;

    fn sample_incident() -> Incident {
        Incident {
            id: IncidentId::generate(),
            service_id: ServiceId::new("svc-1"),
            severity: Severity::High,
            status: IncidentStatus::Open,
            summary: "disk usage critical".to_string(),
            signals: Vec::new(),
            timeline: Vec::new(),
            runbook_refs: Vec::new(),
            created_at: Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("valid"),
            updated_at: Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("valid"),
            correlation_id: None,
        }
    }

    #[test]
    fn save_then_get_round_trips() {
        let repo = InMemoryIncidentRepository::new();
        let incident = sample_incident();
        repo.save(&incident).expect("save ok");
        assert_eq!(repo.get(&incident.id).expect("no backend error"), Some(incident));
    }

    #[test]
    fn list_reflects_every_saved_incident() {
        let repo = InMemoryIncidentRepository::new();
        repo.save(&sample_incident()).expect("save ok");
        repo.save(&sample_incident()).expect("save ok");
        assert_eq!(repo.list().expect("no backend error").len(), 2);
    }
}
