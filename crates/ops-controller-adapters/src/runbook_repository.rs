// crates/ops-controller-adapters/src/runbook_repository.rs
// ============================================================================
// Module: In-Memory Runbook Repository
// Description: Default RunbookRepository adapter backed by process-local
// maps for actions and jobs.
// Purpose: Ship a working backend with no external dependency.
// Dependencies: ops-controller-core, std::sync
// ============================================================================

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::RwLock;

use ops_controller_core::ActionId;
use ops_controller_core::JobId;
use ops_controller_core::RemediationJob;
use ops_controller_core::RunbookAction;
use ops_controller_core::RunbookRepository;
use ops_controller_core::RunbookRepositoryError;

/// Process-local, in-memory [`RunbookRepository`] implementation.
///
/// # Invariants
/// - Jobs are held behind a single [`Mutex`], not one lock per job: the
///   cooldown scan in `ops-controller-core`'s runbook use-case and the
///   subsequent job insert both take this same lock, the coarse-grained
///   stand-in for a per-`(service_id, action_id)` lock named in spec.md §5.
#[derive(Default)]
pub struct InMemoryRunbookRepository {
    /// Allow-listed actions keyed by id.
    actions: RwLock<HashMap<ActionId, RunbookAction>>,
    /// Remediation jobs, in insertion order.
    jobs: Mutex<Vec<RemediationJob>>,
}

impl InMemoryRunbookRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunbookRepository for InMemoryRunbookRepository {
    fn add_action(&self, action: &RunbookAction) -> Result<(), RunbookRepositoryError> {
        let mut actions = self.actions.write().map_err(|_| lock_poisoned())?;
        actions.insert(action.id.clone(), action.clone());
        Ok(())
    }

    fn get_action(&self, action_id: &ActionId) -> Result<Option<RunbookAction>, RunbookRepositoryError> {
        let actions = self.actions.read().map_err(|_| lock_poisoned())?;
        Ok(actions.get(action_id).cloned())
    }

    fn list_actions(&self) -> Result<Vec<RunbookAction>, RunbookRepositoryError> {
        let actions = self.actions.read().map_err(|_| lock_poisoned())?;
        Ok(actions.values().cloned().collect())
    }

    fn save_job(&self, job: &RemediationJob) -> Result<(), RunbookRepositoryError> {
        let mut jobs = self.jobs.lock().map_err(|_| lock_poisoned())?;
        if let Some(existing) = jobs.iter_mut().find(|stored| stored.id == job.id) {
            *existing = job.clone();
        } else {
            jobs.push(job.clone());
        }
        Ok(())
    }

    fn get_job(&self, job_id: &JobId) -> Result<Option<RemediationJob>, RunbookRepositoryError> {
        let jobs = self.jobs.lock().map_err(|_| lock_poisoned())?;
        Ok(jobs.iter().find(|stored| &stored.id == job_id).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<RemediationJob>, RunbookRepositoryError> {
        let jobs = self.jobs.lock().map_err(|_| lock_poisoned())?;
        Ok(jobs.clone())
    }
}

fn lock_poisoned() -> RunbookRepositoryError {
    RunbookRepositoryError::Backend("in-memory runbook repository lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ops_controller_core::ActionId;
    use ops_controller_core::IncidentId;
    use ops_controller_core::JobId;
    use ops_controller_core::RemediationJob;
    use ops_controller_core::RemediationStatus;
    use ops_controller_core::RunbookAction;
    use ops_controller_core::ServiceId;
    use platform_core::Timestamp;

    use super::InMemoryRunbookRepository;
    use super::RunbookRepository;

    fn sample_action() -> RunbookAction {
        RunbookAction {
            id: ActionId::new("restart-pod"),
            name: "Restart pod".to_string(),
            description: "Restarts the unhealthy pod".to_string(),
            allowed_params: vec!["pod_name".to_string()],
            cooldown_seconds: 300,
            requires_approval: false,
            guardrails: BTreeMap::new(),
        }
    }

    fn sample_job() -> RemediationJob {
        RemediationJob {
            id: JobId::generate(),
            incident_id: IncidentId::generate(),
            action_id: ActionId::new("restart-pod"),
            service_id: ServiceId::new("svc-1"),
            params: BTreeMap::new(),
            actor: "oncall".to_string(),
            correlation_id: None,
            status: RemediationStatus::Pending,
            started_at: Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("valid"),
            finished_at: None,
            output: None,
            error: None,
        }
    }

    #[test]
    fn add_action_then_get_round_trips() {
        let repo = InMemoryRunbookRepository::new();
        let action = sample_action();
        repo.add_action(&action).expect("add ok");
        assert_eq!(repo.get_action(&action.id).expect("no backend error"), Some(action));
    }

    #[test]
    fn save_job_then_get_round_trips() {
        let repo = InMemoryRunbookRepository::new();
        let job = sample_job();
        repo.save_job(&job).expect("save ok");
        assert_eq!(repo.get_job(&job.id).expect("no backend error"), Some(job));
    }

    #[test]
    fn list_jobs_reflects_every_saved_job() {
        let repo = InMemoryRunbookRepository::new();
        repo.save_job(&sample_job()).expect("save ok");
        repo.save_job(&sample_job()).expect("save ok");
        assert_eq!(repo.list_jobs().expect("no backend error").len(), 2);
    }
}
