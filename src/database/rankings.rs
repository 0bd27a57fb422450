// ABOUTME: Ranking aggregations over reviews and statuses grouped by book
// ABOUTME: Highest mean rating, most recent status change, and status count inside a window
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Each ranking groups records by ISBN, orders the groups by their aggregate
//! (descending, ties by ISBN ascending), keeps the first `limit` groups, and
//! joins the book for every group. A group only exists when at least one
//! record matched the filter, so empty output means "nothing to rank".

use super::books::{row_to_book, JOINED_BOOK_COLUMNS};
use super::{format_timestamp, parse_timestamp};
use crate::errors::{AppError, AppResult};
use crate::models::{PopularBook, RatedBook, ReadingStatus, RecentBook};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

/// Ranking queries
pub struct RankingsManager {
    pool: SqlitePool,
}

impl RankingsManager {
    /// Create a new rankings manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Books by mean review rating, highest first
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation fails
    pub async fn highest_rated(&self, limit: u32) -> AppResult<Vec<RatedBook>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT r.isbn AS isbn, AVG(r.stars) AS average_rating, {JOINED_BOOK_COLUMNS}
            FROM reviews r JOIN books b ON b.isbn = r.isbn
            GROUP BY r.isbn
            ORDER BY average_rating DESC, r.isbn ASC
            LIMIT $1
            "
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to rank books by rating: {e}")))?;

        rows.iter()
            .map(|row| -> AppResult<RatedBook> {
                Ok(RatedBook {
                    book: row_to_book(row, row.get("isbn"))?,
                    average_rating: row.get("average_rating"),
                })
            })
            .collect()
    }

    /// Books by their latest status change, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation fails
    pub async fn recently_updated(
        &self,
        status: Option<ReadingStatus>,
        limit: u32,
    ) -> AppResult<Vec<RecentBook>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT s.isbn AS isbn, MAX(s.date) AS last_date, {JOINED_BOOK_COLUMNS}
            FROM statuses s JOIN books b ON b.isbn = s.isbn
            WHERE ($1 IS NULL OR s.status = $1)
            GROUP BY s.isbn
            ORDER BY last_date DESC, s.isbn ASC
            LIMIT $2
            "
        ))
        .bind(status.map(ReadingStatus::code))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to rank recently updated books: {e}")))?;

        rows.iter()
            .map(|row| -> AppResult<RecentBook> {
                let last_date: String = row.get("last_date");
                Ok(RecentBook {
                    book: row_to_book(row, row.get("isbn"))?,
                    date: parse_timestamp(&last_date)?,
                })
            })
            .collect()
    }

    /// Books by number of status changes since `since`, most first
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation fails
    pub async fn popular(
        &self,
        status: Option<ReadingStatus>,
        since: DateTime<Utc>,
        limit: u32,
    ) -> AppResult<Vec<PopularBook>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT s.isbn AS isbn, COUNT(*) AS status_count, {JOINED_BOOK_COLUMNS}
            FROM statuses s JOIN books b ON b.isbn = s.isbn
            WHERE s.date >= $1 AND ($2 IS NULL OR s.status = $2)
            GROUP BY s.isbn
            ORDER BY status_count DESC, s.isbn ASC
            LIMIT $3
            "
        ))
        .bind(format_timestamp(since))
        .bind(status.map(ReadingStatus::code))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to rank popular books: {e}")))?;

        rows.iter()
            .map(|row| -> AppResult<PopularBook> {
                let count: i64 = row.get("status_count");
                Ok(PopularBook {
                    book: row_to_book(row, row.get("isbn"))?,
                    count: u32::try_from(count)
                        .map_err(|e| AppError::internal(format!("Invalid status count: {e}")))?,
                })
            })
            .collect()
    }
}
