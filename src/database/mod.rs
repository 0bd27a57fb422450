// ABOUTME: SQLite-backed record store for books, reviews, reading statuses, and users
// ABOUTME: Owns the connection pool, schema migrations, and timestamp encoding
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Database Management
//!
//! Books, reviews, statuses, and users live in four tables. Reviews and statuses
//! use `(isbn, username)` as their primary key, so the store itself rejects a
//! second record for the same user and book.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings in UTC, which makes
//! lexical comparison in SQL (`MAX(date)`, `date >= ?`) chronological.

mod books;
mod rankings;
mod reviews;
mod statuses;
mod users;

pub use books::BooksManager;
pub use rankings::RankingsManager;
pub use reviews::ReviewsManager;
pub use statuses::StatusesManager;
pub use users::UsersManager;

use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Database handle shared by all services
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations
    ///
    /// In-memory databases are pinned to a single connection that never expires;
    /// every new `:memory:` connection would otherwise be an empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        if !in_memory {
            ensure_parent_dir(options.get_filename())?;
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(in_memory, "Database ready");
        Ok(db)
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Book operations
    #[must_use]
    pub fn books(&self) -> BooksManager {
        BooksManager::new(self.pool.clone())
    }

    /// Review operations
    #[must_use]
    pub fn reviews(&self) -> ReviewsManager {
        ReviewsManager::new(self.pool.clone())
    }

    /// Reading status operations
    #[must_use]
    pub fn statuses(&self) -> StatusesManager {
        StatusesManager::new(self.pool.clone())
    }

    /// User account operations
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Ranking aggregations
    #[must_use]
    pub fn rankings(&self) -> RankingsManager {
        RankingsManager::new(self.pool.clone())
    }

    /// Run schema migrations; every statement is idempotent
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        // Books first: reviews and statuses reference them
        self.migrate_books().await?;
        self.migrate_users().await?;
        self.migrate_reviews().await?;
        self.migrate_statuses().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    /// Round-trip a trivial query, used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database health check failed: {e}")))?;
        Ok(())
    }

    async fn execute_ddl(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        }
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| {
                AppError::config(format!(
                    "Cannot create database directory {}: {e}",
                    parent.display()
                ))
            }),
        _ => Ok(()),
    }
}

/// Encode a timestamp in the fixed-width form stored in `date` columns
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a stored timestamp
///
/// # Errors
///
/// Returns an internal error if the column does not hold RFC 3339 text
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid stored timestamp {raw}: {e}")))
}

/// Translate a failed write, naming the conflict for unique-index violations
pub(crate) fn write_error(error: sqlx::Error, conflict: &str, action: &str) -> AppError {
    let mut error = AppError::from(error);
    match error.code {
        ErrorCode::ResourceAlreadyExists => conflict.clone_into(&mut error.message),
        ErrorCode::DatabaseError => error.message = format!("Failed to {action}: {}", error.message),
        _ => {}
    }
    error
}
