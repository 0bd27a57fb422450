// ABOUTME: Review table keyed by (isbn, username) with the referenced book joined on read
// ABOUTME: CRUD operations; listings are ordered newest first
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::books::{row_to_book, JOINED_BOOK_COLUMNS};
use super::{format_timestamp, parse_timestamp, write_error, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Review;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

impl Database {
    pub(super) async fn migrate_reviews(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS reviews (
                isbn TEXT NOT NULL REFERENCES books(isbn),
                username TEXT NOT NULL REFERENCES users(username),
                stars INTEGER NOT NULL CHECK (stars BETWEEN 0 AND 5),
                text TEXT NOT NULL DEFAULT '',
                date TEXT NOT NULL,
                PRIMARY KEY (isbn, username)
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_reviews_date ON reviews(date)",
        ])
        .await
    }
}

/// Review database operations manager
pub struct ReviewsManager {
    pool: SqlitePool,
}

impl ReviewsManager {
    /// Create a new reviews manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT r.isbn, r.username, r.stars, r.text, r.date, {JOINED_BOOK_COLUMNS} \
             FROM reviews r JOIN books b ON b.isbn = r.isbn {filter}"
        )
    }

    /// Insert a review
    ///
    /// # Errors
    ///
    /// Returns a conflict if the user already reviewed the book, or a database error
    pub async fn create(
        &self,
        isbn: &str,
        username: &str,
        stars: u8,
        text: &str,
        date: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO reviews (isbn, username, stars, text, date) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(isbn)
        .bind(username)
        .bind(i64::from(stars))
        .bind(text)
        .bind(format_timestamp(date))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "Review already exists.", "create review"))?;

        Ok(())
    }

    /// Get the review a user wrote for a book
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt
    pub async fn get(&self, username: &str, isbn: &str) -> AppResult<Option<Review>> {
        let row = sqlx::query(&Self::select("WHERE r.username = $1 AND r.isbn = $2"))
            .bind(username)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get review: {e}")))?;

        row.map(|r| row_to_review(&r)).transpose()
    }

    /// All reviews, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_all(&self) -> AppResult<Vec<Review>> {
        let rows = sqlx::query(&Self::select("ORDER BY r.date DESC, r.isbn ASC, r.username ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list reviews: {e}")))?;

        rows.iter().map(row_to_review).collect()
    }

    /// Reviews of one book, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_for_book(&self, isbn: &str) -> AppResult<Vec<Review>> {
        let rows = sqlx::query(&Self::select(
            "WHERE r.isbn = $1 ORDER BY r.date DESC, r.username ASC",
        ))
        .bind(isbn)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list reviews: {e}")))?;

        rows.iter().map(row_to_review).collect()
    }

    /// Replace rating and text; returns whether the review existed
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update(
        &self,
        isbn: &str,
        username: &str,
        stars: u8,
        text: &str,
        date: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE reviews SET stars = $1, text = $2, date = $3 WHERE isbn = $4 AND username = $5",
        )
        .bind(i64::from(stars))
        .bind(text)
        .bind(format_timestamp(date))
        .bind(isbn)
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update review: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a review; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete(&self, username: &str, isbn: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE username = $1 AND isbn = $2")
            .bind(username)
            .bind(isbn)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete review: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_review(row: &SqliteRow) -> AppResult<Review> {
    let isbn: String = row.get("isbn");
    let stars: i64 = row.get("stars");
    let date: String = row.get("date");

    Ok(Review {
        book: row_to_book(row, isbn.clone())?,
        isbn,
        username: row.get("username"),
        stars: u8::try_from(stars)
            .map_err(|e| AppError::internal(format!("Invalid stored rating: {e}")))?,
        text: row.get("text"),
        date: parse_timestamp(&date)?,
    })
}
