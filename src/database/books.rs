// ABOUTME: Book table schema and queries keyed by ISBN
// ABOUTME: Shares the joined book column list and row decoding with reviews, statuses, and rankings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{write_error, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Book;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Book columns selected alongside reviews and statuses (`b` aliases `books`)
pub(super) const JOINED_BOOK_COLUMNS: &str = "b.title, b.authors, b.cover, b.pages, \
     b.published, b.publisher, b.language, b.description, b.categories";

impl Database {
    pub(super) async fn migrate_books(&self) -> AppResult<()> {
        self.execute_ddl(&[r"
            CREATE TABLE IF NOT EXISTS books (
                isbn TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                authors TEXT NOT NULL,
                cover TEXT NOT NULL,
                pages INTEGER NOT NULL CHECK (pages >= 0),
                published TEXT NOT NULL,
                publisher TEXT NOT NULL,
                language TEXT NOT NULL,
                description TEXT NOT NULL,
                categories TEXT NOT NULL
            )
            "])
        .await
    }
}

/// Book database operations manager
pub struct BooksManager {
    pool: SqlitePool,
}

impl BooksManager {
    /// Create a new books manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a book
    ///
    /// # Errors
    ///
    /// Returns a conflict if the ISBN is already stored, or a database error
    pub async fn create(&self, book: &Book) -> AppResult<()> {
        let authors_json = serde_json::to_string(&book.authors)?;
        let categories_json = serde_json::to_string(&book.categories)?;

        sqlx::query(
            r"
            INSERT INTO books (
                isbn, title, authors, cover, pages, published,
                publisher, language, description, categories
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&authors_json)
        .bind(&book.cover)
        .bind(i64::from(book.pages))
        .bind(&book.published)
        .bind(&book.publisher)
        .bind(&book.language)
        .bind(&book.description)
        .bind(&categories_json)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "Book already exists.", "create book"))?;

        Ok(())
    }

    /// Get a book by ISBN
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt
    pub async fn get(&self, isbn: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query(&format!(
            "SELECT b.isbn, {JOINED_BOOK_COLUMNS} FROM books b WHERE b.isbn = $1"
        ))
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get book: {e}")))?;

        row.map(|r| row_to_book(&r, r.get("isbn"))).transpose()
    }

    /// Whether a book with this ISBN is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exists(&self, isbn: &str) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up book: {e}")))?;
        Ok(found.is_some())
    }
}

/// Decode the joined book columns of a row; the caller supplies the ISBN column it selected
pub(super) fn row_to_book(row: &SqliteRow, isbn: String) -> AppResult<Book> {
    let authors_json: String = row.get("authors");
    let categories_json: String = row.get("categories");
    let pages: i64 = row.get("pages");

    Ok(Book {
        isbn,
        title: row.get("title"),
        authors: serde_json::from_str(&authors_json)?,
        cover: row.get("cover"),
        pages: u32::try_from(pages)
            .map_err(|e| AppError::internal(format!("Invalid stored page count: {e}")))?,
        published: row.get("published"),
        publisher: row.get("publisher"),
        language: row.get("language"),
        description: row.get("description"),
        categories: serde_json::from_str(&categories_json)?,
    })
}
