// crates/ops-controller-adapters/src/registry.rs
// ============================================================================
// Module: In-Memory Service Registry
// Description: Default ServiceRepository adapter backed by a process-local
// map.
// Purpose: Ship a working backend with no external dependency.
// Dependencies: ops-controller-core, std::sync
// ============================================================================

//! ## Overview
//! This is test/default infrastructure, not a scalability claim: state is
//! lost on process restart.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::RwLock;

use ops_controller_core::Service;
use ops_controller_core::ServiceId;
use ops_controller_core::ServiceRepository;
use ops_controller_core::ServiceRepositoryError;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Process-local, in-memory [`ServiceRepository`] implementation.
#[derive(Default)]
pub struct InMemoryServiceRepository {
    /// Services keyed by their id.
    services: RwLock<HashMap<ServiceId, Service>>,
}

impl InMemoryServiceRepository {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ServiceRepository for InMemoryServiceRepository {
    fn upsert(&self, service: &Service) -> Result<(), ServiceRepositoryError> {
        let mut services = self.services.write().map_err(|_| lock_poisoned())?;
        services.insert(service.id.clone(), service.clone());
        Ok(())
    }

    fn get(&self, service_id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError> {
        let services = self.services.read().map_err(|_| lock_poisoned())?;
        Ok(services.get(service_id).cloned())
    }

    fn list(&self) -> Result<Vec<Service>, ServiceRepositoryError> {
        let services = self.services.read().map_err(|_| lock_poisoned())?;
        Ok(services.values().cloned().collect())
    }
}

fn lock_poisoned() -> ServiceRepositoryError {
    ServiceRepositoryError::Backend("in-memory service repository lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use ops_controller_core::Environment;
    use ops_controller_core::Service;
    use ops_controller_core::ServiceId;

    use super::InMemoryServiceRepository;
    use super::ServiceRepository;

    fn sample_service() -> Service {
        Service {
            id: ServiceId::new("checkout-api"),
            name: "Checkout API".to_string(),
            env: Environment::Prod,
            owners: vec!["team-payments".to_string()],
            health_url: None,
            logging_endpoint: None,
            tags: Vec::new(),
            otel_config: std::collections::BTreeMap::new(),
            metadata: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let repo = InMemoryServiceRepository::new();
        let service = sample_service();
        repo.upsert(&service).expect("upsert succeeds");
        assert_eq!(repo.get(&service.id).expect("no backend error"), Some(service));
    }

    #[test]
    fn upsert_replaces_the_prior_service_with_the_same_id() {
        let repo = InMemoryServiceRepository::new();
        let mut service = sample_service();
        repo.upsert(&service).expect("upsert succeeds");
        service.name = "Checkout API v2".to_string();
        repo.upsert(&service).expect("upsert succeeds");
        let fetched = repo.get(&service.id).expect("no backend error").expect("present");
        assert_eq!(fetched.name, "Checkout API v2");
        assert_eq!(repo.list().expect("no backend error").len(), 1);
    }
}
