// crates/catalog-query/src/interfaces/mod.rs
// ============================================================================
// Module: CatalogQuery Interfaces
// Description: The book repository port and the query filters it accepts.
// Purpose: Keep filter composition and pagination rules independent of any
// particular storage engine.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! [`BookQuery`] mirrors the filter fields the original import API accepts
//! on `GET /books`; [`BookRepository::list`] is the single place that must
//! apply them identically regardless of backend.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Book;
use crate::core::BookId;

// ============================================================================
// SECTION: Book Repository
// ============================================================================

/// Errors a [`BookRepository`] implementation may report.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend failed to complete the operation.
    #[error("repository backend error: {0}")]
    Backend(String),
    /// `insert` was given an ISBN already used by a different book.
    #[error("isbn already in use: {0}")]
    DuplicateIsbn(String),
}

/// Persistence port for the book catalog.
///
/// # Invariants
/// - `insert` rejects a non-empty `isbn` already held by a different book
///   (the unique sparse index named in the data model, observed here as a
///   repository-level constraint since no document store is in scope).
/// - `list` returns a page matching `query`, sorted `(title asc, id asc)`,
///   alongside the total count of all matching books (not just the page).
pub trait BookRepository: Send + Sync {
    /// Inserts a new book.
    ///
    /// # Errors
    /// Returns [`RepositoryError::DuplicateIsbn`] when `book.isbn` is
    /// non-empty and already used by a different book, or
    /// [`RepositoryError::Backend`] when the backend fails.
    fn insert(&self, book: Book) -> Result<Book, RepositoryError>;

    /// Looks up a book by id.
    ///
    /// # Errors
    /// Returns [`RepositoryError::Backend`] when the backend fails.
    fn get(&self, id: &BookId) -> Result<Option<Book>, RepositoryError>;

    /// Returns the page of books matching `query`, and the total count of
    /// all books matching `query` (independent of pagination).
    ///
    /// # Errors
    /// Returns [`RepositoryError::Backend`] when the backend fails.
    fn list(&self, query: &BookQuery) -> Result<(Vec<Book>, usize), RepositoryError>;
}

// ============================================================================
// SECTION: Book Query
// ============================================================================

/// Filters and pagination accepted by [`BookRepository::list`].
///
/// # Invariants
/// - An absent filter matches every book on that dimension.
/// - `page` is 1-based; `limit` is clamped to `[1, 100]` by
///   [`BookQuery::new`], matching the original API's `Query(ge=1)` /
///   `Query(ge=1, le=100)` constraints.
#[derive(Debug, Clone)]
pub struct BookQuery {
    /// Free-text match against title, authors, description, or genre.
    pub q: Option<String>,
    /// Case-insensitive substring match against any author.
    pub author: Option<String>,
    /// Case-insensitive full-string match against genre.
    pub genre: Option<String>,
    /// When `Some(true)`, only books with a non-empty isbn; when
    /// `Some(false)`, only books with an absent or empty isbn.
    pub has_isbn: Option<bool>,
    /// 1-based page number.
    pub page: u32,
    /// Page size, clamped to `[1, 100]`.
    pub limit: u32,
}

impl BookQuery {
    /// Builds a query, clamping `page` to at least 1 and `limit` to
    /// `[1, 100]`.
    #[must_use]
    pub fn new(
        q: Option<String>,
        author: Option<String>,
        genre: Option<String>,
        has_isbn: Option<bool>,
        page: u32,
        limit: u32,
    ) -> Self {
        Self { q, author, genre, has_isbn, page: page.max(1), limit: limit.clamp(1, 100) }
    }

    /// Returns the number of leading books to skip for this page.
    #[must_use]
    pub fn skip(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

impl Default for BookQuery {
    fn default() -> Self {
        Self::new(None, None, None, None, 1, 20)
    }
}

#[cfg(test)]
mod tests {
    use super::BookQuery;

    #[test]
    fn limit_is_clamped_to_one_hundred() {
        let query = BookQuery::new(None, None, None, None, 1, 500);
        assert_eq!(query.limit, 100);
    }

    #[test]
    fn limit_is_clamped_to_at_least_one() {
        let query = BookQuery::new(None, None, None, None, 1, 0);
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn page_below_one_is_clamped_to_one() {
        let query = BookQuery::new(None, None, None, None, 0, 20);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn skip_is_zero_indexed_from_page_one() {
        let query = BookQuery::new(None, None, None, None, 3, 20);
        assert_eq!(query.skip(), 40);
    }
}
