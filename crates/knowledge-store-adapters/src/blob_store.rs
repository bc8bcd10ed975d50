// crates/knowledge-store-adapters/src/blob_store.rs
// ============================================================================
// Module: In-Memory Blob Store
// Description: Default BlobStore adapter keyed by run/external id path.
// Purpose: Ship a working backend with no object-store SDK dependency.
// Dependencies: knowledge-store-core, std::sync
// ============================================================================

//! ## Overview
//! Paths follow `runs/<run_id>/<external_id>.<ext>`, with `<ext>` derived
//! from an optional content-type hint (defaulting to `txt`). Content lives
//! only for the life of the process; this is the in-memory stand-in for an
//! object store such as S3, not a durability guarantee.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::RwLock;

use knowledge_store_core::BlobStore;
use knowledge_store_core::BlobStoreError;
use knowledge_store_core::RunId;

const DEFAULT_EXTENSION: &str = "txt";

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Process-local, in-memory [`BlobStore`] implementation.
#[derive(Default)]
pub struct InMemoryBlobStore {
    /// Stored content keyed by its generated URI.
    blobs: RwLock<HashMap<String, String>>,
}

impl InMemoryBlobStore {
    /// Creates an empty blob store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content stored at `uri`, if any.
    ///
    /// # Errors
    /// Returns [`BlobStoreError`] when the backend lock is poisoned.
    pub fn read(&self, uri: &str) -> Result<Option<String>, BlobStoreError> {
        let blobs = self.blobs.read().map_err(|_| lock_poisoned())?;
        Ok(blobs.get(uri).cloned())
    }
}

impl BlobStore for InMemoryBlobStore {
    fn store(
        &self,
        run_id: &RunId,
        external_id: &str,
        content_type: Option<&str>,
        content: &str,
    ) -> Result<String, BlobStoreError> {
        let ext = extension_for(content_type);
        let uri = format!("runs/{run_id}/{external_id}.{ext}");
        let mut blobs = self.blobs.write().map_err(|_| lock_poisoned())?;
        blobs.insert(uri.clone(), content.to_string());
        Ok(uri)
    }
}

/// Maps a MIME-style content-type hint to a file extension.
fn extension_for(content_type: Option<&str>) -> &'static str {
    match content_type {
        Some("application/json") => "json",
        Some("text/markdown") => "md",
        Some("text/html") => "html",
        Some("application/yaml" | "text/yaml") => "yaml",
        _ => DEFAULT_EXTENSION,
    }
}

fn lock_poisoned() -> BlobStoreError {
    BlobStoreError::Backend("in-memory blob store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::InMemoryBlobStore;
    use super::BlobStore;

    #[test]
    fn store_builds_the_canonical_path() {
        let store = InMemoryBlobStore::new();
        let run_id = knowledge_store_core::RunId::new("run-1");
        let uri = store.store(&run_id, "doc-1", None, "hello").expect("store succeeds");
        assert_eq!(uri, "runs/run-1/doc-1.txt");
        assert_eq!(store.read(&uri).expect("read succeeds"), Some("hello".to_string()));
    }

    #[test]
    fn store_uses_content_type_hint_for_extension() {
        let store = InMemoryBlobStore::new();
        let run_id = knowledge_store_core::RunId::new("run-1");
        let uri = store
            .store(&run_id, "doc-1", Some("application/json"), "{}")
            .expect("store succeeds");
        assert!(uri.ends_with(".json"));
    }
}
