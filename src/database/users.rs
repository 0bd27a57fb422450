// ABOUTME: User account table with unique usernames and e-mail addresses
// ABOUTME: Stores bcrypt hashes only; profiles returned to callers never include them
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{write_error, Database};
use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        self.execute_ddl(&[
            r"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                joined TEXT NOT NULL
            )
            ",
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email)",
        ])
        .await
    }
}

/// User database operations manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user with an already hashed password
    ///
    /// # Errors
    ///
    /// Returns a conflict if the username or e-mail is taken, or a database error
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        joined: NaiveDate,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO users (username, email, password_hash, joined) VALUES ($1, $2, $3, $4)",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(joined.format("%Y-%m-%d").to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "Username or e-mail is already taken.", "create user"))?;

        Ok(())
    }

    /// Get a user's public profile
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored join date is corrupt
    pub async fn get_profile(&self, username: &str) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query("SELECT username, email, joined FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| {
            let joined: String = r.get("joined");
            Ok(UserProfile {
                username: r.get("username"),
                email: r.get("email"),
                joined: NaiveDate::parse_from_str(&joined, "%Y-%m-%d")
                    .map_err(|e| AppError::internal(format!("Invalid stored join date: {e}")))?,
            })
        })
        .transpose()
    }

    /// Get the stored password hash for login
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_password_hash(&self, username: &str) -> AppResult<Option<String>> {
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get credentials: {e}")))
    }

    /// Whether a user with this username exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exists(&self, username: &str) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user: {e}")))?;
        Ok(found.is_some())
    }

    /// Whether an account other than `username` already uses `email`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn email_taken_by_other(&self, email: &str, username: &str) -> AppResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE email = $1 AND username != $2")
                .bind(email)
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to look up e-mail: {e}")))?;
        Ok(found.is_some())
    }

    /// Replace e-mail and password hash; returns whether the user existed
    ///
    /// # Errors
    ///
    /// Returns a conflict if the e-mail is taken, or a database error
    pub async fn update(&self, username: &str, email: &str, password_hash: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE users SET email = $1, password_hash = $2 WHERE username = $3")
                .bind(email)
                .bind(password_hash)
                .bind(username)
                .execute(&self.pool)
                .await
                .map_err(|e| write_error(e, "E-mail is already taken.", "update user"))?;

        Ok(result.rows_affected() > 0)
    }
}
