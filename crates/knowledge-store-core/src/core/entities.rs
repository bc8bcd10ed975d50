// crates/knowledge-store-core/src/core/entities.rs
// ============================================================================
// Module: KnowledgeStore Entities
// Description: Source, Tag, Version, KnowledgeEntry, AuditEvent, IngestionRun.
// Purpose: Carry the domain invariants of the ingestion pipeline independent
// of any storage backend.
// Dependencies: platform-core, serde
// ============================================================================

//! ## Overview
//! `KnowledgeEntry` holds an append-only, non-empty version history once
//! saved; no two adjacent versions share a fingerprint. `IngestionRun` is
//! written once and is immutable thereafter; its `run_id` is the key the
//! ingestion use-case checks for idempotent replay.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use platform_core::Timestamp;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EntryId;
use crate::core::identifiers::RunId;
use crate::core::identifiers::VersionId;

// ============================================================================
// SECTION: Source
// ============================================================================

/// Classification of the system that produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    /// Originated from the quality-gate scan service.
    QualityGate,
    /// Originated from the incident/runbook controller.
    Ops,
    /// Originated from a code-generation collaborator.
    CodeGen,
    /// Any other originating system.
    Other,
}

impl SourceType {
    /// Returns the lowercase-hyphenated token used in derived enrichment
    /// tags (`source:<type>`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QualityGate => "quality-gate",
            Self::Ops => "ops",
            Self::CodeGen => "code-gen",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The system that produced a document ingested into KnowledgeStore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Stable identifier of the originating system, e.g. `"s1"`.
    pub id: String,
    /// Human-readable name of the originating system.
    pub name: String,
    /// Classification used for the derived enrichment tag and search facet.
    #[serde(rename = "type")]
    pub kind: SourceType,
}

// ============================================================================
// SECTION: Tag
// ============================================================================

/// A key, optionally carrying a value, attached to a version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key; tags are deduplicated by key when merged.
    pub key: String,
    /// Optional tag value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Tag {
    /// Builds a tag with no value.
    #[must_use]
    pub fn key_only(key: impl Into<String>) -> Self {
        Self { key: key.into(), value: None }
    }

    /// Merges a set of tags, keeping the first occurrence of each key (the
    /// original's "union, duplicates dropped by key" enrichment rule).
    #[must_use]
    pub fn merge_union(existing: &[Self], incoming: &[Self]) -> Vec<Self> {
        let mut seen = BTreeSet::new();
        let mut merged = Vec::with_capacity(existing.len() + incoming.len());
        for tag in existing.iter().chain(incoming.iter()) {
            if seen.insert(tag.key.clone()) {
                merged.push(tag.clone());
            }
        }
        merged
    }
}

// ============================================================================
// SECTION: Version
// ============================================================================

/// One immutable version of a knowledge entry's content.
///
/// # Invariants
/// - `fingerprint` is `SHA256(normalized_content)` in lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Identifier unique within the owning entry.
    pub id: VersionId,
    /// Lowercase hex SHA-256 of `normalized_content`.
    pub fingerprint: String,
    /// Content after the pipeline's normalization step.
    pub normalized_content: String,
    /// Caller-supplied or derived summary.
    pub summary: String,
    /// Tags attached to this version, post-enrichment.
    pub tags: Vec<Tag>,
    /// Deduplicated taxonomy tokens, first-occurrence order preserved.
    pub taxonomy: Vec<String>,
    /// URI of the persisted raw content, when a blob store is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_uri: Option<String>,
    /// When this version was created.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Knowledge Entry
// ============================================================================

/// A logical document identified by `(source, external_id)`.
///
/// # Invariants
/// - `versions` is non-empty once the entry has been saved at least once.
/// - No two adjacent versions share a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Canonical id: `"<source.id>:<external_id>"`.
    pub id: EntryId,
    /// The system that produced this entry.
    pub source: Source,
    /// The caller-supplied external identifier within the source.
    pub external_id: String,
    /// Append-only, insertion-ordered version history.
    pub versions: Vec<Version>,
}

impl KnowledgeEntry {
    /// Creates a new entry with no versions yet.
    #[must_use]
    pub fn new(source: Source, external_id: impl Into<String>) -> Self {
        let external_id = external_id.into();
        let id = EntryId::derive(&source.id, &external_id);
        Self { id, source, external_id, versions: Vec::new() }
    }

    /// Returns the most recently appended version, if any.
    #[must_use]
    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Appends a new version.
    ///
    /// # Panics
    /// Panics if `version.fingerprint` matches the current latest version's
    /// fingerprint; callers must check for the dedup case themselves before
    /// calling this (the ingestion pipeline always does).
    pub fn add_version(&mut self, version: Version) {
        assert!(
            self.latest_version().map(|latest| latest.fingerprint != version.fingerprint)
                .unwrap_or(true),
            "add_version called with a fingerprint matching the current latest version"
        );
        self.versions.push(version);
    }
}

// ============================================================================
// SECTION: Audit Event
// ============================================================================

/// A pipeline step within a single ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStep {
    /// Raw content was written to the blob store.
    PersistRaw,
    /// Content normalization ran.
    Normalize,
    /// Fingerprint and tag enrichment ran.
    Enrich,
    /// Summary was computed.
    Summarize,
    /// Entry was dedup-checked and versioned (or not).
    Persist,
    /// The search index was updated.
    Index,
}

/// Outcome of an audit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// The step completed without incident.
    Ok,
    /// A new version was appended.
    Versioned,
    /// The fingerprint matched the latest version; no version was appended.
    Deduplicated,
    /// The step failed; the owning request is abandoned.
    Failed,
}

/// An immutable structured record of a pipeline step outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The run this event belongs to.
    pub run_id: RunId,
    /// Which pipeline step produced this event.
    pub step: AuditStep,
    /// Outcome of the step.
    pub status: AuditStatus,
    /// The entry (or, for a failed request, the external id) this concerns.
    pub entry_id: String,
    /// When the event was recorded.
    pub timestamp: Timestamp,
    /// Optional human-readable detail, e.g. a failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Structured metadata, e.g. `{"uri": ...}` for `persist_raw`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Ingestion Run
// ============================================================================

/// Completion status of an ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// At least one request in the run succeeded.
    Completed,
    /// Every request in the run failed.
    Failed,
}

/// One document submitted for ingestion within a run.
///
/// Recorded verbatim on the stored [`IngestionRun`] so `Reprocess` can
/// replay it; the only mutation applied before storage is stamping
/// `run_id` once it is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionRequest {
    /// Caller-supplied identifier within the source system.
    pub external_id: String,
    /// The system that produced this document.
    pub source: Source,
    /// Raw, not-yet-normalized content.
    pub content: String,
    /// Tags supplied by the caller, before enrichment.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Taxonomy tokens supplied by the caller, before deduplication.
    #[serde(default)]
    pub taxonomy: Vec<String>,
    /// Caller-supplied summary; when absent one is derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Optional MIME-style content type hint used to pick a blob extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Outcome of ingesting a single [`IngestionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResult {
    /// The entry the request resolved to.
    pub entry_id: EntryId,
    /// The version id the request resolved to (existing, if deduplicated).
    pub version_id: VersionId,
    /// The fingerprint computed for the request's normalized content.
    pub fingerprint: String,
    /// The run this result belongs to.
    pub run_id: RunId,
    /// Whether the request's content matched the entry's latest version.
    pub deduplicated: bool,
}

/// A batch of ingestion requests processed together under one `run_id`.
///
/// # Invariants
/// - `run_id` is globally unique.
/// - A completed run is immutable; re-submitting the same `run_id` must
///   return its stored `results` verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionRun {
    /// Globally unique id identifying this run.
    pub run_id: RunId,
    /// The requests submitted in this run, in order, recorded verbatim for
    /// replay via `Reprocess`.
    pub requests: Vec<IngestionRequest>,
    /// The results produced for each request, positional with `requests`.
    pub results: Vec<IngestionResult>,
    /// Whether the run as a whole completed or failed.
    pub status: RunStatus,
    /// When the run began.
    pub started_at: Timestamp,
    /// When the run finished, if it has.
    pub finished_at: Option<Timestamp>,
    /// Audit events recorded across every request in the run, in order.
    pub audit_events: Vec<AuditEvent>,
}

#[cfg(test)]
mod tests {
    use super::Tag;

    #[test]
    fn merge_union_keeps_first_occurrence_per_key() {
        let existing = vec![Tag { key: "env".into(), value: Some("prod".into()) }];
        let incoming = vec![
            Tag { key: "env".into(), value: Some("staging".into()) },
            Tag::key_only("source:ops"),
        ];
        let merged = Tag::merge_union(&existing, &incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].value.as_deref(), Some("prod"));
        assert_eq!(merged[1].key, "source:ops");
    }
}
