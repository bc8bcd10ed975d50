// crates/catalog-query/src/lib.rs
// ============================================================================
// Module: CatalogQuery Library Root
// Description: Book domain, repository port, and catalog use-cases.
// ============================================================================

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod handlers;
pub mod interfaces;
pub mod routes;
pub mod runtime;
pub mod state;

pub use adapters::InMemoryBookRepository;
pub use config::Config;
pub use core::*;
pub use interfaces::BookQuery;
pub use interfaces::BookRepository;
pub use interfaces::RepositoryError;
pub use routes::build_router;
pub use runtime::InsertBookUseCase;
pub use runtime::ListBooksUseCase;
pub use state::AppState;
