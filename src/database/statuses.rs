// ABOUTME: Reading status table keyed by (isbn, username) with the referenced book joined on read
// ABOUTME: CRUD operations plus per-user listings filtered by status code
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::books::{row_to_book, JOINED_BOOK_COLUMNS};
use super::{format_timestamp, parse_timestamp, write_error, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{BookStatus, ReadingStatus};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

impl Database {
    pub(super) async fn migrate_statuses(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS statuses (
                isbn TEXT NOT NULL REFERENCES books(isbn),
                username TEXT NOT NULL REFERENCES users(username),
                status INTEGER NOT NULL CHECK (status BETWEEN 0 AND 2),
                date TEXT NOT NULL,
                PRIMARY KEY (isbn, username)
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_statuses_date ON statuses(date)",
            "CREATE INDEX IF NOT EXISTS idx_statuses_username ON statuses(username)",
        ])
        .await
    }
}

/// Reading status database operations manager
pub struct StatusesManager {
    pool: SqlitePool,
}

impl StatusesManager {
    /// Create a new statuses manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT s.isbn, s.username, s.status, s.date, {JOINED_BOOK_COLUMNS} \
             FROM statuses s JOIN books b ON b.isbn = s.isbn {filter}"
        )
    }

    /// Insert a status
    ///
    /// # Errors
    ///
    /// Returns a conflict if the user already has a status for the book, or a database error
    pub async fn create(
        &self,
        isbn: &str,
        username: &str,
        status: ReadingStatus,
        date: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO statuses (isbn, username, status, date) VALUES ($1, $2, $3, $4)")
            .bind(isbn)
            .bind(username)
            .bind(status.code())
            .bind(format_timestamp(date))
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, "Status already exists.", "create status"))?;

        Ok(())
    }

    /// Get a user's status for a book
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt
    pub async fn get(&self, username: &str, isbn: &str) -> AppResult<Option<BookStatus>> {
        let row = sqlx::query(&Self::select("WHERE s.username = $1 AND s.isbn = $2"))
            .bind(username)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get status: {e}")))?;

        row.map(|r| row_to_status(&r)).transpose()
    }

    /// A user's statuses, optionally restricted to one status code, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_for_user(
        &self,
        username: &str,
        status: Option<ReadingStatus>,
    ) -> AppResult<Vec<BookStatus>> {
        let rows = sqlx::query(&Self::select(
            "WHERE s.username = $1 AND ($2 IS NULL OR s.status = $2) \
             ORDER BY s.date DESC, s.isbn ASC",
        ))
        .bind(username)
        .bind(status.map(ReadingStatus::code))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list statuses: {e}")))?;

        rows.iter().map(row_to_status).collect()
    }

    /// Change the status code; returns whether the status existed
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update(
        &self,
        isbn: &str,
        username: &str,
        status: ReadingStatus,
        date: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE statuses SET status = $1, date = $2 WHERE isbn = $3 AND username = $4",
        )
        .bind(status.code())
        .bind(format_timestamp(date))
        .bind(isbn)
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update status: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a status; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete(&self, username: &str, isbn: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM statuses WHERE username = $1 AND isbn = $2")
            .bind(username)
            .bind(isbn)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete status: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_status(row: &SqliteRow) -> AppResult<BookStatus> {
    let isbn: String = row.get("isbn");
    let code: i64 = row.get("status");
    let date: String = row.get("date");

    Ok(BookStatus {
        book: row_to_book(row, isbn.clone())?,
        isbn,
        username: row.get("username"),
        status: ReadingStatus::from_code(code)
            .map_err(|e| AppError::internal(format!("Invalid stored status: {e}")))?,
        date: parse_timestamp(&date)?,
    })
}
