// crates/catalog-query/src/handlers.rs
// ============================================================================
// Module: CatalogQuery HTTP Handlers
// Description: Request parsing and dispatch to the catalog use-cases.
// Purpose: Implement the book query and insert surface.
// Dependencies: axum, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! `GET /books` accepts the same filter and pagination query parameters the
//! original API accepts; `POST /books` inserts a new book.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::Query;
use axum::extract::State;
use serde::Deserialize;
use serde::Serialize;

use crate::core::Book;
use crate::core::BookId;
use crate::error::ApiError;
use crate::interfaces::BookQuery;
use crate::state::AppState;

// ============================================================================
// SECTION: Health
// ============================================================================

#[derive(Serialize)]
struct HealthBody {
    /// Always `"ok"`; the handler only runs when the process is up.
    status: &'static str,
    /// Fixed service name, useful when aggregating health checks.
    service: &'static str,
}

/// `GET /health`.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok", service: "catalog-query" })
}

// ============================================================================
// SECTION: List Books
// ============================================================================

#[derive(Deserialize)]
pub struct ListBooksParams {
    /// Free-text filter across title, authors, description, and genre.
    q: Option<String>,
    /// Case-insensitive substring filter against any author.
    author: Option<String>,
    /// Case-insensitive full-string filter against genre.
    genre: Option<String>,
    /// When present, filters on isbn presence/absence.
    has_isbn: Option<bool>,
    /// 1-based page number; defaults to 1.
    page: Option<u32>,
    /// Page size, clamped to `[1, 100]`; defaults to 20.
    limit: Option<u32>,
}

#[derive(Serialize)]
pub struct ListBooksBody {
    /// The page of matching books.
    books: Vec<Book>,
    /// Total number of books matching the filters, independent of paging.
    total: usize,
    /// Echoed page number.
    page: u32,
    /// Echoed page size.
    limit: u32,
}

/// `GET /books`.
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListBooksParams>,
) -> Result<Json<ListBooksBody>, ApiError> {
    let query = BookQuery::new(params.q, params.author, params.genre, params.has_isbn, params.page.unwrap_or(1), params.limit.unwrap_or(20));
    let (books, total) = state.list.list(&query)?;
    Ok(Json(ListBooksBody { books, total, page: query.page, limit: query.limit }))
}

// ============================================================================
// SECTION: Insert Book
// ============================================================================

#[derive(Deserialize)]
pub struct InsertBookBody {
    /// Caller-supplied id; a fresh id is generated when absent.
    id: Option<String>,
    /// Title.
    title: String,
    /// Author names.
    #[serde(default)]
    authors: Vec<String>,
    /// ISBN, when known.
    isbn: Option<String>,
    /// Genre, when known.
    genre: Option<String>,
    /// Description, when known.
    description: Option<String>,
    /// Cover image links, when known.
    image_links: Option<String>,
    /// Publication date, as given by the caller.
    published_date: Option<String>,
    /// Free-form metadata.
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

/// `POST /books`.
pub async fn insert_book(
    State(state): State<Arc<AppState>>,
    Json(body): Json<InsertBookBody>,
) -> Result<Json<Book>, ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::validation("title must not be empty"));
    }
    let book = state.insert.insert(
        body.id.map(BookId::new),
        body.title,
        body.authors,
        body.isbn,
        body.genre,
        body.description,
        body.image_links,
        body.published_date,
        body.metadata,
    )?;
    Ok(Json(book))
}
