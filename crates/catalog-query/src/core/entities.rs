// crates/catalog-query/src/core/entities.rs
// ============================================================================
// Module: CatalogQuery Entities
// Description: The Book domain entity, with its store-only derived fields.
// Purpose: Carry the catalog's identity invariants (fingerprint, title
// normalization) independent of any repository or HTTP concern.
// Dependencies: platform-core, serde
// ============================================================================

//! ## Overview
//! `_fingerprint` and `_title_norm` are derived, not caller-supplied: they
//! exist so a repository can detect duplicate books and support
//! case-insensitive title lookups without recomputing normalization on
//! every query. Both are recomputed whenever `title` or `authors` change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use platform_core::Timestamp;
use platform_core::sha256_hex;
use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BookId;

/// Normalizes a string for fingerprinting and title lookups: trims, folds
/// internal whitespace runs to a single space, and lowercases.
fn norm(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Normalizes an author list into the single string consumed by
/// `fingerprint`: each author normalized individually, joined by `,` in
/// the list's given order (order matters: `["A", "B"]` and `["B", "A"]`
/// are treated as different books, matching how the original import
/// script de-duplicates on exact author-list match).
fn norm_authors(authors: &[String]) -> String {
    authors.iter().map(|author| norm(author)).collect::<Vec<_>>().join(",")
}

// ============================================================================
// SECTION: Book
// ============================================================================

/// A catalog entry.
///
/// # Invariants
/// - `_fingerprint` and `_title_norm` are always in sync with `title` and
///   `authors`: both are recomputed by [`Book::new`] and [`Book::retitle`],
///   never set directly by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Caller-supplied or generated identifier.
    pub id: BookId,
    /// Title.
    pub title: String,
    /// Author names, in catalog order.
    pub authors: Vec<String>,
    /// ISBN, when known.
    pub isbn: Option<String>,
    /// Genre, when known.
    pub genre: Option<String>,
    /// Description, when known.
    pub description: Option<String>,
    /// Cover image links, when known.
    pub image_links: Option<String>,
    /// Publication date, when known, as given by the source (not parsed).
    pub published_date: Option<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Derived identity hash: `SHA256(norm(title) + "|" + norm(authors))`.
    #[serde(rename = "_fingerprint")]
    pub fingerprint: String,
    /// Derived normalized title, used for case-insensitive lookups.
    #[serde(rename = "_title_norm")]
    pub title_norm: String,
    /// When this book was first stored.
    pub created_at: Timestamp,
    /// When this book was last modified.
    pub updated_at: Timestamp,
}

impl Book {
    /// Builds a book, computing `_fingerprint` and `_title_norm` from
    /// `title` and `authors`, stamping `created_at`/`updated_at` with `now`.
    #[must_use]
    #[allow(clippy::too_many_arguments, reason = "mirrors the field count of the Book entity itself")]
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        authors: Vec<String>,
        isbn: Option<String>,
        genre: Option<String>,
        description: Option<String>,
        image_links: Option<String>,
        published_date: Option<String>,
        metadata: BTreeMap<String, String>,
        now: Timestamp,
    ) -> Self {
        let title = title.into();
        let fingerprint = sha256_hex(&format!("{}|{}", norm(&title), norm_authors(&authors)));
        let title_norm = norm(&title);
        Self {
            id,
            title,
            authors,
            isbn,
            genre,
            description,
            image_links,
            published_date,
            metadata,
            fingerprint,
            title_norm,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces `title` and/or `authors`, recomputing the derived fields
    /// and bumping `updated_at`.
    pub fn retitle(&mut self, title: impl Into<String>, authors: Vec<String>, now: Timestamp) {
        self.title = title.into();
        self.authors = authors;
        self.fingerprint = sha256_hex(&format!("{}|{}", norm(&self.title), norm_authors(&self.authors)));
        self.title_norm = norm(&self.title);
        self.updated_at = now;
    }

    /// Returns whether `isbn` is present and non-empty.
    #[must_use]
    pub fn has_isbn(&self) -> bool {
        self.isbn.as_deref().is_some_and(|isbn| !isbn.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use platform_core::Timestamp;

    use super::Book;
    use super::BookId;

    fn ts() -> Timestamp {
        Timestamp::parse_rfc3339("2026-01-01T00:00:00Z").expect("timestamp")
    }

    #[test]
    fn fingerprint_ignores_case_and_surrounding_whitespace() {
        let a = Book::new(
            BookId::new("1"),
            "  The Pragmatic  Programmer ",
            vec!["Hunt".to_string(), "Thomas".to_string()],
            None,
            None,
            None,
            None,
            None,
            BTreeMap::new(),
            ts(),
        );
        let b = Book::new(
            BookId::new("2"),
            "the pragmatic programmer",
            vec!["hunt".to_string(), "thomas".to_string()],
            None,
            None,
            None,
            None,
            None,
            BTreeMap::new(),
            ts(),
        );
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn author_order_changes_the_fingerprint() {
        let a = Book::new(
            BookId::new("1"),
            "T",
            vec!["A".to_string(), "B".to_string()],
            None,
            None,
            None,
            None,
            None,
            BTreeMap::new(),
            ts(),
        );
        let b = Book::new(
            BookId::new("2"),
            "T",
            vec!["B".to_string(), "A".to_string()],
            None,
            None,
            None,
            None,
            None,
            BTreeMap::new(),
            ts(),
        );
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn has_isbn_is_false_for_absent_or_empty() {
        let mut book = Book::new(BookId::new("1"), "T", vec![], None, None, None, None, None, BTreeMap::new(), ts());
        assert!(!book.has_isbn());
        book.isbn = Some(String::new());
        assert!(!book.has_isbn());
        book.isbn = Some("0-000".to_string());
        assert!(book.has_isbn());
    }

    #[test]
    fn retitle_recomputes_fingerprint_and_bumps_updated_at() {
        let mut book = Book::new(BookId::new("1"), "Old", vec![], None, None, None, None, None, BTreeMap::new(), ts());
        let before = book.fingerprint.clone();
        let later = Timestamp::parse_rfc3339("2026-02-01T00:00:00Z").expect("timestamp");
        book.retitle("New", vec!["A".to_string()], later);
        assert_ne!(book.fingerprint, before);
        assert_eq!(book.updated_at, later);
    }
}
