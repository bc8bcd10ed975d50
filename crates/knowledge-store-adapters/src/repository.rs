// crates/knowledge-store-adapters/src/repository.rs
// ============================================================================
// Module: In-Memory Knowledge Repository
// Description: Default KnowledgeRepository adapter backed by a process-local
// map, with a per-entry lock registry serializing version appends.
// Purpose: Ship a working backend with no external dependency, satisfying
// the per-entry write serialization invariant.
// Dependencies: knowledge-store-core, std::sync
// ============================================================================

//! ## Overview
//! This is test/default infrastructure, not a scalability claim: state is
//! lost on process restart. `entry_locks` realizes the lock-registry option
//! for per-entry serialization — two concurrent saves for the same entry id
//! take the same `Mutex<()>`, so writer B observes writer A's result before
//! deciding whether its own fingerprint is a duplicate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;

use knowledge_store_core::AuditEvent;
use knowledge_store_core::EntryId;
use knowledge_store_core::IngestionRun;
use knowledge_store_core::KnowledgeEntry;
use knowledge_store_core::KnowledgeRepository;
use knowledge_store_core::RepositoryError;
use knowledge_store_core::RunId;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Process-local, in-memory [`KnowledgeRepository`] implementation.
#[derive(Default)]
pub struct InMemoryKnowledgeRepository {
    /// Entries keyed by their canonical id.
    entries: RwLock<HashMap<EntryId, KnowledgeEntry>>,
    /// Completed or failed runs keyed by `run_id`.
    runs: RwLock<HashMap<RunId, IngestionRun>>,
    /// Audit events in insertion order across every run.
    audit_log: Mutex<Vec<AuditEvent>>,
    /// Per-entry locks realizing single-writer serialization.
    entry_locks: Mutex<HashMap<EntryId, Arc<Mutex<()>>>>,
}

impl InMemoryKnowledgeRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the per-entry lock for `entry_id`, creating one if absent.
    ///
    /// Callers hold this lock across the whole "read latest fingerprint,
    /// decide dedup, maybe append" sequence so two concurrent ingests for
    /// the same entry cannot interleave.
    #[must_use]
    pub fn lock_for_entry(&self, entry_id: &EntryId) -> Arc<Mutex<()>> {
        let mut locks =
            self.entry_locks.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(locks.entry(entry_id.clone()).or_insert_with(|| Arc::new(Mutex::new(()))))
    }
}

impl KnowledgeRepository for InMemoryKnowledgeRepository {
    fn get_entry(&self, entry_id: &EntryId) -> Result<Option<KnowledgeEntry>, RepositoryError> {
        let entries = self.entries.read().map_err(|_| lock_poisoned())?;
        Ok(entries.get(entry_id).cloned())
    }

    fn save_entry(&self, entry: &KnowledgeEntry) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;
        entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    fn list_entries(&self) -> Result<Vec<KnowledgeEntry>, RepositoryError> {
        let entries = self.entries.read().map_err(|_| lock_poisoned())?;
        Ok(entries.values().cloned().collect())
    }

    fn record_run(&self, run: &IngestionRun) -> Result<(), RepositoryError> {
        let mut runs = self.runs.write().map_err(|_| lock_poisoned())?;
        runs.insert(run.run_id.clone(), run.clone());
        Ok(())
    }

    fn get_run(&self, run_id: &RunId) -> Result<Option<IngestionRun>, RepositoryError> {
        let runs = self.runs.read().map_err(|_| lock_poisoned())?;
        Ok(runs.get(run_id).cloned())
    }

    fn record_audit_events(&self, events: &[AuditEvent]) -> Result<(), RepositoryError> {
        let mut log = self.audit_log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        log.extend_from_slice(events);
        Ok(())
    }
}

fn lock_poisoned() -> RepositoryError {
    RepositoryError::Backend("in-memory repository lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use knowledge_store_core::Source;
    use knowledge_store_core::SourceType;

    use super::InMemoryKnowledgeRepository;
    use super::KnowledgeRepository;

    #[test]
    fn get_entry_returns_none_for_unknown_id() {
        let repo = InMemoryKnowledgeRepository::new();
        let id = knowledge_store_core::EntryId::derive("s1", "x");
        assert!(repo.get_entry(&id).expect("no backend error").is_none());
    }

    #[test]
    fn save_then_get_round_trips() {
        let repo = InMemoryKnowledgeRepository::new();
        let source = Source { id: "s1".into(), name: "Source One".into(), kind: SourceType::Ops };
        let entry = knowledge_store_core::KnowledgeEntry::new(source, "doc-1");
        repo.save_entry(&entry).expect("save succeeds");
        let fetched = repo.get_entry(&entry.id).expect("no backend error");
        assert_eq!(fetched, Some(entry));
    }

    #[test]
    fn lock_for_entry_returns_the_same_mutex_for_the_same_id() {
        let repo = InMemoryKnowledgeRepository::new();
        let id = knowledge_store_core::EntryId::derive("s1", "doc-1");
        let first = repo.lock_for_entry(&id);
        let second = repo.lock_for_entry(&id);
        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }
}
