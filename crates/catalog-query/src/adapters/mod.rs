// crates/catalog-query/src/adapters/mod.rs
// ============================================================================
// Module: CatalogQuery Adapters
// Description: Concrete BookRepository implementations.
// ============================================================================

pub mod memory;

pub use memory::InMemoryBookRepository;
