// crates/catalog-query/src/runtime/catalog.rs
// ============================================================================
// Module: CatalogQuery Catalog Use-Cases
// Description: Insert and list orchestration over the book repository port.
// Purpose: Stamp identifiers and timestamps on insert; delegate filter
// composition and pagination to the repository for list.
// Dependencies: platform-core, crate::core, crate::interfaces
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use platform_core::Clock;

use crate::core::Book;
use crate::core::BookId;
use crate::interfaces::BookQuery;
use crate::interfaces::BookRepository;
use crate::interfaces::RepositoryError;

// ============================================================================
// SECTION: Insert Book
// ============================================================================

/// Inserts new books, stamping identifiers and timestamps.
pub struct InsertBookUseCase {
    /// Persistence port.
    repository: Arc<dyn BookRepository>,
    /// Time source for `created_at`/`updated_at`.
    clock: Arc<dyn Clock>,
}

impl InsertBookUseCase {
    /// Builds a use-case backed by `repository` and `clock`.
    #[must_use]
    pub fn new(repository: Arc<dyn BookRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Inserts a book, assigning a fresh id when `id` is `None`.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the id is already in use, the isbn
    /// collides with a different book, or the backend fails.
    #[allow(clippy::too_many_arguments, reason = "mirrors the field count of the Book entity itself")]
    pub fn insert(
        &self,
        id: Option<BookId>,
        title: impl Into<String>,
        authors: Vec<String>,
        isbn: Option<String>,
        genre: Option<String>,
        description: Option<String>,
        image_links: Option<String>,
        published_date: Option<String>,
        metadata: BTreeMap<String, String>,
    ) -> Result<Book, RepositoryError> {
        let id = id.unwrap_or_else(BookId::generate);
        let now = self.clock.now();
        let book = Book::new(id, title, authors, isbn, genre, description, image_links, published_date, metadata, now);
        self.repository.insert(book)
    }
}

// ============================================================================
// SECTION: List Books
// ============================================================================

/// Lists books matching a [`BookQuery`].
pub struct ListBooksUseCase {
    /// Persistence port.
    repository: Arc<dyn BookRepository>,
}

impl ListBooksUseCase {
    /// Builds a use-case backed by `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Returns the page of books matching `query` and the total matching
    /// count.
    ///
    /// # Errors
    /// Returns [`RepositoryError`] when the backend fails.
    pub fn list(&self, query: &BookQuery) -> Result<(Vec<Book>, usize), RepositoryError> {
        self.repository.list(query)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::Mutex;

    use platform_core::Clock;
    use platform_core::SystemClock;

    use super::InsertBookUseCase;
    use super::ListBooksUseCase;
    use crate::core::Book;
    use crate::core::BookId;
    use crate::interfaces::BookQuery;
    use crate::interfaces::BookRepository;
    use crate::interfaces::RepositoryError;

    #[derive(Default)]
    struct StubRepository {
        books: Mutex<Vec<Book>>,
    }

    impl BookRepository for StubRepository {
        fn insert(&self, book: Book) -> Result<Book, RepositoryError> {
            self.books.lock().expect("lock").push(book.clone());
            Ok(book)
        }

        fn get(&self, id: &BookId) -> Result<Option<Book>, RepositoryError> {
            Ok(self.books.lock().expect("lock").iter().find(|book| &book.id == id).cloned())
        }

        fn list(&self, _query: &BookQuery) -> Result<(Vec<Book>, usize), RepositoryError> {
            let books = self.books.lock().expect("lock").clone();
            let total = books.len();
            Ok((books, total))
        }
    }

    #[test]
    fn insert_assigns_a_fresh_id_when_none_is_given() {
        let repository = Arc::new(StubRepository::default());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let use_case = InsertBookUseCase::new(repository, clock);
        let book = use_case
            .insert(None, "Title", vec!["Author".to_string()], None, None, None, None, None, BTreeMap::new())
            .expect("insert");
        assert!(!book.id.as_str().is_empty());
    }

    #[test]
    fn insert_honors_a_caller_supplied_id() {
        let repository = Arc::new(StubRepository::default());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let use_case = InsertBookUseCase::new(repository, clock);
        let book = use_case
            .insert(
                Some(BookId::new("book-1")),
                "Title",
                vec!["Author".to_string()],
                None,
                None,
                None,
                None,
                None,
                BTreeMap::new(),
            )
            .expect("insert");
        assert_eq!(book.id, BookId::new("book-1"));
    }

    #[test]
    fn list_delegates_to_the_repository() {
        let repository = Arc::new(StubRepository::default());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let insert_use_case = InsertBookUseCase::new(Arc::clone(&repository) as Arc<dyn BookRepository>, clock);
        insert_use_case
            .insert(None, "Title", vec!["Author".to_string()], None, None, None, None, None, BTreeMap::new())
            .expect("insert");

        let list_use_case = ListBooksUseCase::new(repository);
        let (books, total) = list_use_case.list(&BookQuery::default()).expect("list");
        assert_eq!(total, 1);
        assert_eq!(books.len(), 1);
    }
}
