// crates/catalog-query/src/adapters/memory.rs
// ============================================================================
// Module: In-Memory Book Repository
// Description: Default BookRepository adapter backed by a process-local
// map, with isbn/fingerprint lookup maps for duplicate-aware inserts.
// Purpose: Ship a working backend with no external dependency, reproducing
// the filter-composition semantics of the original document-store query
// builder without a document store.
// Dependencies: catalog-query (core, interfaces), regex, std::sync
// ============================================================================

//! ## Overview
//! This is test/default infrastructure, not a scalability claim, the same
//! framing the workspace already applies to its other in-memory adapters.
//! `isbn_index` and `fingerprint_index` stand in for the unique sparse
//! index and the derived-field index named in the data model; both are
//! maintained on every insert so uniqueness and de-duplication are
//! observable without a document store.
//!
//! Filters are composed the way the original query builder composes Mongo
//! `$regex` filters: `q` ORs a case-insensitive substring match across
//! title, authors, description, and genre; `author` is a case-insensitive
//! substring match against any author; `genre` is a case-insensitive
//! *full-string* match, not a substring match.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;
use regex::RegexBuilder;

use crate::core::Book;
use crate::core::BookId;
use crate::interfaces::BookQuery;
use crate::interfaces::BookRepository;
use crate::interfaces::RepositoryError;

// ============================================================================
// SECTION: Matching Helpers
// ============================================================================

/// Builds a case-insensitive substring-match regex over literal `needle`.
fn substring_matcher(needle: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(needle)).case_insensitive(true).build().ok()
}

/// Builds a case-insensitive full-string-match regex over literal `needle`.
fn full_match_matcher(needle: &str) -> Option<Regex> {
    RegexBuilder::new(&format!("^{}$", regex::escape(needle))).case_insensitive(true).build().ok()
}

fn matches_q(book: &Book, matcher: &Regex) -> bool {
    matcher.is_match(&book.title)
        || book.authors.iter().any(|author| matcher.is_match(author))
        || book.description.as_deref().is_some_and(|description| matcher.is_match(description))
        || book.genre.as_deref().is_some_and(|genre| matcher.is_match(genre))
}

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Process-local, in-memory [`BookRepository`] implementation.
#[derive(Default)]
pub struct InMemoryBookRepository {
    /// Books keyed by id.
    books: RwLock<HashMap<BookId, Book>>,
    /// Non-empty isbn to owning book id, enforcing the unique sparse index.
    isbn_index: RwLock<HashMap<String, BookId>>,
    /// Fingerprint to owning book id, for duplicate-aware inserts.
    fingerprint_index: RwLock<HashMap<String, BookId>>,
}

impl InMemoryBookRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of an existing book sharing `book`'s fingerprint, if
    /// any.
    #[must_use]
    pub fn find_duplicate(&self, book: &Book) -> Option<BookId> {
        let index = self.fingerprint_index.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        index.get(&book.fingerprint).cloned()
    }
}

impl BookRepository for InMemoryBookRepository {
    fn insert(&self, book: Book) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().map_err(|_| lock_poisoned())?;
        let mut isbn_index = self.isbn_index.write().map_err(|_| lock_poisoned())?;
        let mut fingerprint_index = self.fingerprint_index.write().map_err(|_| lock_poisoned())?;

        if book.has_isbn() {
            let isbn = book.isbn.clone().unwrap_or_default();
            if let Some(existing) = isbn_index.get(&isbn) {
                if existing != &book.id {
                    return Err(RepositoryError::DuplicateIsbn(isbn));
                }
            }
        }

        if let Some(isbn) = book.isbn.as_ref().filter(|isbn| !isbn.is_empty()) {
            isbn_index.insert(isbn.clone(), book.id.clone());
        }
        fingerprint_index.insert(book.fingerprint.clone(), book.id.clone());
        books.insert(book.id.clone(), book.clone());
        Ok(book)
    }

    fn get(&self, id: &BookId) -> Result<Option<Book>, RepositoryError> {
        let books = self.books.read().map_err(|_| lock_poisoned())?;
        Ok(books.get(id).cloned())
    }

    fn list(&self, query: &BookQuery) -> Result<(Vec<Book>, usize), RepositoryError> {
        let books = self.books.read().map_err(|_| lock_poisoned())?;

        let q_matcher = query.q.as_deref().and_then(substring_matcher);
        let author_matcher = query.author.as_deref().and_then(substring_matcher);
        let genre_matcher = query.genre.as_deref().and_then(full_match_matcher);

        let mut matched: Vec<Book> = books
            .values()
            .filter(|book| q_matcher.as_ref().is_none_or(|matcher| matches_q(book, matcher)))
            .filter(|book| {
                author_matcher
                    .as_ref()
                    .is_none_or(|matcher| book.authors.iter().any(|author| matcher.is_match(author)))
            })
            .filter(|book| {
                genre_matcher
                    .as_ref()
                    .is_none_or(|matcher| book.genre.as_deref().is_some_and(|genre| matcher.is_match(genre)))
            })
            .filter(|book| query.has_isbn.is_none_or(|wanted| book.has_isbn() == wanted))
            .cloned()
            .collect();

        matched.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));

        let total = matched.len();
        let page: Vec<Book> = matched.into_iter().skip(query.skip()).take(query.limit as usize).collect();
        Ok((page, total))
    }
}

fn lock_poisoned() -> RepositoryError {
    RepositoryError::Backend("in-memory repository lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use platform_core::Timestamp;

    use super::InMemoryBookRepository;
    use super::RepositoryError;
    use crate::core::Book;
    use crate::core::BookId;
    use crate::interfaces::BookQuery;
    use crate::interfaces::BookRepository;

    fn ts() -> Timestamp {
        Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("timestamp")
    }

    fn book(id: &str, title: &str, authors: &[&str], isbn: Option<&str>, genre: Option<&str>) -> Book {
        Book::new(
            BookId::new(id),
            title,
            authors.iter().map(|a| a.to_string()).collect(),
            isbn.map(str::to_string),
            genre.map(str::to_string),
            None,
            None,
            None,
            BTreeMap::new(),
            ts(),
        )
    }

    #[test]
    fn duplicate_isbn_on_a_different_book_is_rejected() {
        let repo = InMemoryBookRepository::new();
        repo.insert(book("1", "A", &["X"], Some("978-0"), None)).expect("first insert");
        let result = repo.insert(book("2", "B", &["Y"], Some("978-0"), None));
        assert!(matches!(result, Err(RepositoryError::DuplicateIsbn(_))));
    }

    #[test]
    fn empty_isbn_does_not_collide() {
        let repo = InMemoryBookRepository::new();
        repo.insert(book("1", "A", &["X"], Some(""), None)).expect("first insert");
        repo.insert(book("2", "B", &["Y"], Some(""), None)).expect("second insert");
    }

    #[test]
    fn list_sorts_by_title_then_id() {
        let repo = InMemoryBookRepository::new();
        repo.insert(book("2", "Zebra", &["X"], None, None)).expect("insert");
        repo.insert(book("1", "Apple", &["Y"], None, None)).expect("insert");
        let (books, total) = repo.list(&BookQuery::default()).expect("list");
        assert_eq!(total, 2);
        assert_eq!(books[0].title, "Apple");
        assert_eq!(books[1].title, "Zebra");
    }

    #[test]
    fn q_matches_across_title_authors_and_genre() {
        let repo = InMemoryBookRepository::new();
        repo.insert(book("1", "Rust in Action", &["Tim"], None, Some("systems"))).expect("insert");
        repo.insert(book("2", "Cooking", &["Julia"], None, Some("food"))).expect("insert");

        let query = BookQuery::new(Some("rust".to_string()), None, None, None, 1, 20);
        let (books, total) = repo.list(&query).expect("list");
        assert_eq!(total, 1);
        assert_eq!(books[0].title, "Rust in Action");
    }

    #[test]
    fn genre_filter_requires_a_full_string_match() {
        let repo = InMemoryBookRepository::new();
        repo.insert(book("1", "A", &["X"], None, Some("science fiction"))).expect("insert");
        repo.insert(book("2", "B", &["Y"], None, Some("science"))).expect("insert");

        let query = BookQuery::new(None, None, Some("science".to_string()), None, 1, 20);
        let (books, total) = repo.list(&query).expect("list");
        assert_eq!(total, 1);
        assert_eq!(books[0].id, BookId::new("2"));
    }

    #[test]
    fn has_isbn_filters_on_presence() {
        let repo = InMemoryBookRepository::new();
        repo.insert(book("1", "A", &["X"], Some("978-0"), None)).expect("insert");
        repo.insert(book("2", "B", &["Y"], None, None)).expect("insert");

        let with_isbn = BookQuery::new(None, None, None, Some(true), 1, 20);
        let (books, total) = repo.list(&with_isbn).expect("list");
        assert_eq!(total, 1);
        assert_eq!(books[0].id, BookId::new("1"));

        let without_isbn = BookQuery::new(None, None, None, Some(false), 1, 20);
        let (books, total) = repo.list(&without_isbn).expect("list");
        assert_eq!(total, 1);
        assert_eq!(books[0].id, BookId::new("2"));
    }

    #[test]
    fn pagination_slices_the_sorted_result() {
        let repo = InMemoryBookRepository::new();
        for (id, title) in [("1", "A"), ("2", "B"), ("3", "C")] {
            repo.insert(book(id, title, &["X"], None, None)).expect("insert");
        }
        let query = BookQuery::new(None, None, None, None, 2, 1);
        let (books, total) = repo.list(&query).expect("list");
        assert_eq!(total, 3);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "B");
    }
}
