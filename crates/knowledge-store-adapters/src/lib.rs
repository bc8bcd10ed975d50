// crates/knowledge-store-adapters/src/lib.rs
// ============================================================================
// Module: KnowledgeStore Adapters Library
// Description: In-memory implementations of the KnowledgeStore ports.
// Purpose: Wire a working default backend without an external store
// dependency.
// Dependencies: knowledge-store-core, platform-core
// ============================================================================

//! ## Overview
//! These are the only adapters this repository ships: an in-memory
//! repository, search index, and blob store. `PERSISTENCE=durable` is a
//! recognized configuration value (see `knowledge-store-http::config`) but
//! has no concrete adapter here, matching spec.md's "no opinion on the
//! particular document store" non-goal.

pub mod blob_store;
pub mod repository;
pub mod search_index;

pub use blob_store::InMemoryBlobStore;
pub use repository::InMemoryKnowledgeRepository;
pub use search_index::InMemorySearchIndex;
