// crates/knowledge-store-core/src/runtime/ingest.rs
// ============================================================================
// Module: KnowledgeStore Ingestion Pipeline
// Description: Normalize, fingerprint, enrich, summarize, persist, index,
// audit.
// Purpose: Orchestrate the ingestion use-case over the repository, search
// index, and optional blob store ports.
// Dependencies: crate::core, crate::interfaces, platform-core
// ============================================================================

//! ## Overview
//! `Ingest` is idempotent on `run_id`: a prior run with the same id short-
//! circuits to its stored results with no side effects. Otherwise every
//! request in the batch runs the eight-step pipeline in order; a failure on
//! one request aborts only that request, the remainder of the batch still
//! runs, and the run is marked `completed` once at least one request
//! succeeds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use platform_core::Clock;
use platform_core::Event;
use platform_core::ObservabilityHook;
use platform_core::sha256_hex;

use crate::core::AuditEvent;
use crate::core::AuditStatus;
use crate::core::AuditStep;
use crate::core::IngestionRequest;
use crate::core::IngestionResult;
use crate::core::IngestionRun;
use crate::core::KnowledgeEntry;
use crate::core::RunId;
use crate::core::RunStatus;
use crate::core::Tag;
use crate::core::Version;
use crate::core::identifiers::VersionId;
use crate::interfaces::BlobStore;
use crate::interfaces::KnowledgeRepository;
use crate::interfaces::SearchIndex;

const SUMMARY_MAX_CHARS: usize = 140;
const SUMMARY_ELLIPSIS: &str = "...";

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Outcome of ingesting a single request within a run.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// The request made it through every pipeline step.
    Succeeded(IngestionResult),
    /// A pipeline step failed for this request; the run continues with the
    /// remaining requests.
    Failed {
        /// The request's external id, for correlating with the input batch.
        external_id: String,
        /// Human-readable detail of what failed.
        detail: String,
    },
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Orchestrates the ingestion pipeline over injected ports.
pub struct IngestionPipeline {
    /// Repository port backing entry and run persistence.
    repository: Arc<dyn KnowledgeRepository>,
    /// Search index port updated at the end of every successful request.
    index: Arc<dyn SearchIndex>,
    /// Optional blob store port for the raw-content persist step.
    blob_store: Option<Arc<dyn BlobStore>>,
    /// Clock port used to stamp audit events and run timestamps.
    clock: Arc<dyn Clock>,
    /// Observability sink for use-case events.
    hook: Arc<dyn ObservabilityHook>,
}

impl IngestionPipeline {
    /// Builds a pipeline over the given ports.
    #[must_use]
    pub fn new(
        repository: Arc<dyn KnowledgeRepository>,
        index: Arc<dyn SearchIndex>,
        blob_store: Option<Arc<dyn BlobStore>>,
        clock: Arc<dyn Clock>,
        hook: Arc<dyn ObservabilityHook>,
    ) -> Self {
        Self { repository, index, blob_store, clock, hook }
    }

    /// Ingests a batch of requests under one run id.
    ///
    /// If `run_id` is supplied and a run with that id already exists, its
    /// stored results are returned verbatim and no side effects occur. If
    /// `run_id` is absent, a fresh one is generated.
    ///
    /// # Errors
    /// Returns a [`platform_core::PlatformError`] only when the repository
    /// fails to read the idempotency check or to record the completed run;
    /// per-request pipeline failures are reported in the returned outcomes,
    /// not as an `Err`.
    pub fn ingest(
        &self,
        run_id: Option<RunId>,
        requests: Vec<IngestionRequest>,
    ) -> Result<Vec<IngestOutcome>, platform_core::PlatformError> {
        let run_id = run_id.unwrap_or_else(RunId::generate);

        if let Some(existing) = self
            .repository
            .get_run(&run_id)
            .map_err(|err| platform_core::PlatformError::external(err.to_string()))?
        {
            self.hook.record(Event::ok("knowledge_store.ingest.replayed", None));
            return Ok(existing.results.into_iter().map(IngestOutcome::Succeeded).collect());
        }

        let started_at = self.clock.now();
        let mut audit_events = Vec::new();
        let mut outcomes = Vec::with_capacity(requests.len());
        let mut succeeded_results = Vec::new();

        for request in &requests {
            match self.ingest_one(&run_id, request, &mut audit_events) {
                Ok(result) => {
                    succeeded_results.push(result.clone());
                    outcomes.push(IngestOutcome::Succeeded(result));
                }
                Err(detail) => {
                    audit_events.push(AuditEvent {
                        run_id: run_id.clone(),
                        step: AuditStep::Persist,
                        status: AuditStatus::Failed,
                        entry_id: request.external_id.clone(),
                        timestamp: self.clock.now(),
                        detail: Some(detail.clone()),
                        metadata: BTreeMap::new(),
                    });
                    outcomes.push(IngestOutcome::Failed {
                        external_id: request.external_id.clone(),
                        detail,
                    });
                }
            }
        }

        let status =
            if succeeded_results.is_empty() && !requests.is_empty() {
                RunStatus::Failed
            } else {
                RunStatus::Completed
            };

        let run = IngestionRun {
            run_id: run_id.clone(),
            requests,
            results: succeeded_results,
            status,
            started_at,
            finished_at: Some(self.clock.now()),
            audit_events: audit_events.clone(),
        };

        self.repository
            .record_run(&run)
            .map_err(|err| platform_core::PlatformError::external(err.to_string()))?;
        self.repository
            .record_audit_events(&audit_events)
            .map_err(|err| platform_core::PlatformError::external(err.to_string()))?;

        self.hook.record(Event::ok("knowledge_store.ingest", None));
        Ok(outcomes)
    }

    /// Runs the eight-step pipeline for one request, returning an
    /// `Err(detail)` if a fallible step (blob or repository I/O) failed.
    fn ingest_one(
        &self,
        run_id: &RunId,
        request: &IngestionRequest,
        audit_events: &mut Vec<AuditEvent>,
    ) -> Result<IngestionResult, String> {
        // Step 1: persist raw (optional).
        let raw_uri = if let Some(blob_store) = &self.blob_store {
            let uri = blob_store
                .store(
                    run_id,
                    &request.external_id,
                    request.content_type.as_deref(),
                    &request.content,
                )
                .map_err(|err| err.to_string())?;
            audit_events.push(AuditEvent {
                run_id: run_id.clone(),
                step: AuditStep::PersistRaw,
                status: AuditStatus::Ok,
                entry_id: request.external_id.clone(),
                timestamp: self.clock.now(),
                detail: None,
                metadata: BTreeMap::from([("uri".to_string(), uri.clone())]),
            });
            Some(uri)
        } else {
            None
        };

        // Step 2: normalize.
        let normalized_content = normalize(&request.content);
        let taxonomy = dedup_preserve_order(&request.taxonomy);
        audit_events.push(self.audit_ok(run_id, AuditStep::Normalize, &request.external_id));

        // Step 3: fingerprint.
        let fingerprint = sha256_hex(&normalized_content);
        // Step 4: enrich.
        let enrichment = Tag::key_only(format!("source:{}", request.source.kind));
        let mut incoming_tags = request.tags.clone();
        incoming_tags.push(enrichment);
        audit_events.push(self.audit_ok(run_id, AuditStep::Enrich, &request.external_id));

        // Step 5: summarize.
        let summary = request
            .summary
            .clone()
            .unwrap_or_else(|| summarize(&normalized_content));
        audit_events.push(self.audit_ok(run_id, AuditStep::Summarize, &request.external_id));

        // Step 6: persist with dedup/versioning.
        let mut entry = self
            .repository
            .get_entry(&crate::core::EntryId::derive(&request.source.id, &request.external_id))
            .map_err(|err| err.to_string())?
            .unwrap_or_else(|| KnowledgeEntry::new(request.source.clone(), &request.external_id));

        let deduplicated = entry
            .latest_version()
            .is_some_and(|latest| latest.fingerprint == fingerprint);

        let version_id = if deduplicated {
            audit_events.push(AuditEvent {
                run_id: run_id.clone(),
                step: AuditStep::Persist,
                status: AuditStatus::Deduplicated,
                entry_id: entry.id.as_str().to_string(),
                timestamp: self.clock.now(),
                detail: None,
                metadata: BTreeMap::new(),
            });
            entry
                .latest_version()
                .map(|v| v.id.clone())
                .unwrap_or_else(VersionId::generate)
        } else {
            let tags = Tag::merge_union(&[], &incoming_tags);
            let version = Version {
                id: VersionId::generate(),
                fingerprint: fingerprint.clone(),
                normalized_content: normalized_content.clone(),
                summary,
                tags,
                taxonomy,
                raw_uri,
                created_at: self.clock.now(),
            };
            let version_id = version.id.clone();
            entry.add_version(version);
            self.repository.save_entry(&entry).map_err(|err| err.to_string())?;
            audit_events.push(AuditEvent {
                run_id: run_id.clone(),
                step: AuditStep::Persist,
                status: AuditStatus::Versioned,
                entry_id: entry.id.as_str().to_string(),
                timestamp: self.clock.now(),
                detail: None,
                metadata: BTreeMap::new(),
            });
            version_id
        };

        // Step 7: index.
        self.index.index(&entry).map_err(|err| err.to_string())?;
        audit_events.push(AuditEvent {
            run_id: run_id.clone(),
            step: AuditStep::Index,
            status: AuditStatus::Ok,
            entry_id: entry.id.as_str().to_string(),
            timestamp: self.clock.now(),
            detail: None,
            metadata: BTreeMap::new(),
        });

        Ok(IngestionResult {
            entry_id: entry.id.clone(),
            version_id,
            fingerprint,
            run_id: run_id.clone(),
            deduplicated,
        })
    }

    fn audit_ok(&self, run_id: &RunId, step: AuditStep, entry_id: &str) -> AuditEvent {
        AuditEvent {
            run_id: run_id.clone(),
            step,
            status: AuditStatus::Ok,
            entry_id: entry_id.to_string(),
            timestamp: self.clock.now(),
            detail: None,
            metadata: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: Pure Helpers
// ============================================================================

/// Strips leading/trailing whitespace from every line and rejoins with `\n`.
fn normalize(content: &str) -> String {
    content
        .trim()
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deduplicates tokens, preserving the order of first occurrence.
fn dedup_preserve_order(tokens: &[String]) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    tokens.iter().filter(|token| seen.insert((*token).clone())).cloned().collect()
}

/// Produces the deterministic fallback summary: the first
/// [`SUMMARY_MAX_CHARS`] characters of the single-line projection of
/// `content`, ellipsis-truncated.
fn summarize(content: &str) -> String {
    let single_line = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= SUMMARY_MAX_CHARS {
        return single_line;
    }
    let truncated: String = single_line.chars().take(SUMMARY_MAX_CHARS).collect();
    format!("{truncated}{SUMMARY_ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::dedup_preserve_order;
    use super::normalize;
    use super::summarize;

    #[test]
    fn normalize_trims_every_line() {
        assert_eq!(normalize("  a  \n  b  \n"), "a\nb");
    }

    #[test]
    fn dedup_preserve_order_keeps_first_occurrence() {
        let tokens = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedup_preserve_order(&tokens), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn summarize_truncates_with_ellipsis() {
        let long = "word ".repeat(60);
        let summary = summarize(&long);
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= super::SUMMARY_MAX_CHARS + super::SUMMARY_ELLIPSIS.len());
    }

    #[test]
    fn summarize_short_content_is_unchanged() {
        assert_eq!(summarize("short content"), "short content");
    }
}
