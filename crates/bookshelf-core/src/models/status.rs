// ABOUTME: Reading status record (want-to-read, reading, read) per (isbn, username) pair
// ABOUTME: Serializes the status as its numeric code 0-2
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::Book;
use crate::errors::{AppError, AppResult};
use crate::validation::{validate_isbn, validate_username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's reading state for a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ReadingStatus {
    /// 0
    WantToRead,
    /// 1
    Reading,
    /// 2
    Read,
}

impl ReadingStatus {
    /// Numeric code as stored and transmitted
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::WantToRead => 0,
            Self::Reading => 1,
            Self::Read => 2,
        }
    }

    /// Parse a numeric code
    ///
    /// # Errors
    ///
    /// Returns a validation error for codes outside 0-2
    pub fn from_code(code: i64) -> AppResult<Self> {
        match code {
            0 => Ok(Self::WantToRead),
            1 => Ok(Self::Reading),
            2 => Ok(Self::Read),
            other => Err(AppError::validation(format!(
                "Status must be 0 (want to read), 1 (reading) or 2 (read), got {other}."
            ))),
        }
    }
}

impl TryFrom<i64> for ReadingStatus {
    type Error = AppError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<ReadingStatus> for i64 {
    fn from(status: ReadingStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WantToRead => write!(f, "want to read"),
            Self::Reading => write!(f, "reading"),
            Self::Read => write!(f, "read"),
        }
    }
}

/// A user's reading status for a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookStatus {
    /// Book's ISBN
    pub isbn: String,
    /// Owner
    pub username: String,
    /// Reading state
    pub status: ReadingStatus,
    /// Last change
    pub date: DateTime<Utc>,
    /// Resolved book reference
    pub book: Book,
}

/// Body of `POST /api/statuses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    /// Book's ISBN
    pub isbn: String,
    /// Owner
    pub username: String,
    /// Numeric status code
    pub status: i64,
    /// Book to store first when it is not known yet
    #[serde(default)]
    pub book: Option<Book>,
}

/// Body of `PUT /api/statuses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Book's ISBN
    pub isbn: String,
    /// Owner
    pub username: String,
    /// Numeric status code
    pub status: i64,
}

impl StatusRequest {
    /// Validate the keys and parse the status code
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank keys or an unknown status code
    pub fn validated_status(&self) -> AppResult<ReadingStatus> {
        validate_isbn(&self.isbn)?;
        validate_username(&self.username)?;
        ReadingStatus::from_code(self.status)
    }
}

impl UpdateStatusRequest {
    /// Validate the keys and parse the status code
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank keys or an unknown status code
    pub fn validated_status(&self) -> AppResult<ReadingStatus> {
        validate_isbn(&self.isbn)?;
        validate_username(&self.username)?;
        ReadingStatus::from_code(self.status)
    }
}
