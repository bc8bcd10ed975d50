// crates/knowledge-store-adapters/src/search_index.rs
// ============================================================================
// Module: In-Memory Search Index
// Description: Linear-scan text and facet index over knowledge entries.
// Purpose: Ship a working SearchIndex backend with no external dependency.
// Dependencies: knowledge-store-core, std::sync
// ============================================================================

//! ## Overview
//! Each entry contributes one text blob (`normalized_content ∪ summary` of
//! its latest version) and three facet sets (tag keys, taxonomy tokens,
//! source type). `search` is a linear scan over every indexed entry; this is
//! documented test/default infrastructure, not a scalability claim, the same
//! posture the teacher's in-memory adapters take.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::RwLock;

use knowledge_store_core::EntryId;
use knowledge_store_core::KnowledgeEntry;
use knowledge_store_core::SearchIndex;
use knowledge_store_core::SearchIndexError;
use knowledge_store_core::SearchQuery;

// ============================================================================
// SECTION: Indexed Record
// ============================================================================

struct IndexedEntry {
    /// Lowercased `normalized_content ∪ summary` of the latest version.
    text_blob: String,
    /// Tag keys carried by the latest version.
    tag_keys: HashSet<String>,
    /// Taxonomy tokens carried by the latest version.
    taxonomy: HashSet<String>,
    /// The entry's source type, as its wire token.
    source_type: String,
}

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Process-local, in-memory [`SearchIndex`] implementation.
#[derive(Default)]
pub struct InMemorySearchIndex {
    entries: RwLock<HashMap<EntryId, IndexedEntry>>,
}

impl InMemorySearchIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchIndex for InMemorySearchIndex {
    fn index(&self, entry: &KnowledgeEntry) -> Result<(), SearchIndexError> {
        let Some(latest) = entry.latest_version() else {
            return Ok(());
        };
        let text_blob = format!("{} {}", latest.normalized_content, latest.summary).to_lowercase();
        let tag_keys = latest.tags.iter().map(|tag| tag.key.clone()).collect();
        let taxonomy = latest.taxonomy.iter().cloned().collect();
        let source_type = entry.source.kind.as_str().to_string();

        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;
        entries.insert(
            entry.id.clone(),
            IndexedEntry { text_blob, tag_keys, taxonomy, source_type },
        );
        Ok(())
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<EntryId>, SearchIndexError> {
        let entries = self.entries.read().map_err(|_| lock_poisoned())?;
        let text_filter = query.text.as_ref().map(|text| text.to_lowercase());

        let mut matches: Vec<EntryId> = entries
            .iter()
            .filter(|(_, indexed)| matches_query(indexed, query, text_filter.as_deref()))
            .map(|(id, _)| id.clone())
            .collect();
        matches.sort();
        Ok(matches)
    }
}

fn matches_query(
    indexed: &IndexedEntry,
    query: &SearchQuery,
    text_filter: Option<&str>,
) -> bool {
    if let Some(text) = text_filter {
        if !indexed.text_blob.contains(text) {
            return false;
        }
    }
    if !query.tags.is_empty() && query.tags.iter().all(|tag| !indexed.tag_keys.contains(tag)) {
        return false;
    }
    if !query.taxonomy.is_empty()
        && query.taxonomy.iter().all(|token| !indexed.taxonomy.contains(token))
    {
        return false;
    }
    if !query.source_types.is_empty()
        && !query.source_types.iter().any(|kind| kind.as_str() == indexed.source_type)
    {
        return false;
    }
    true
}

fn lock_poisoned() -> SearchIndexError {
    SearchIndexError::Backend("in-memory search index lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use knowledge_store_core::Source;
    use knowledge_store_core::SourceType;
    use knowledge_store_core::Tag;
    use knowledge_store_core::Version;
    use platform_core::Clock;
    use platform_core::SystemClock;

    use super::InMemorySearchIndex;
    use super::SearchIndex;
    use super::SearchQuery;

    fn entry_with_text(text: &str) -> knowledge_store_core::KnowledgeEntry {
        let source = Source { id: "s1".into(), name: "Source One".into(), kind: SourceType::Ops };
        let mut entry = knowledge_store_core::KnowledgeEntry::new(source, "doc-1");
        entry.add_version(Version {
            id: knowledge_store_core::VersionId::new("v1"),
            fingerprint: "fp".into(),
            normalized_content: text.to_string(),
            summary: "summary".into(),
            tags: vec![Tag::key_only("env")],
            taxonomy: vec!["infra".into()],
            raw_uri: None,
            created_at: SystemClock.now(),
        });
        entry
    }

    #[test]
    fn text_filter_matches_case_insensitive_substring() {
        let index = InMemorySearchIndex::new();
        let entry = entry_with_text("Database Outage Postmortem");
        index.index(&entry).expect("index succeeds");

        let query = SearchQuery { text: Some("outage".into()), ..Default::default() };
        let hits = index.search(&query).expect("search succeeds");
        assert_eq!(hits, vec![entry.id]);
    }

    #[test]
    fn tag_filter_requires_non_empty_intersection() {
        let index = InMemorySearchIndex::new();
        let entry = entry_with_text("content");
        index.index(&entry).expect("index succeeds");

        let query = SearchQuery { tags: vec!["missing".into()], ..Default::default() };
        assert!(index.search(&query).expect("search succeeds").is_empty());
    }
}
