// ABOUTME: Review record, one per (isbn, username) pair, with a 0-5 star rating
// ABOUTME: Includes the request body shared by the create and update endpoints
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::Book;
use crate::constants::limits::MAX_STARS;
use crate::errors::{AppError, AppResult};
use crate::validation::{validate_isbn, validate_username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's review of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewed book's ISBN
    pub isbn: String,
    /// Reviewer
    pub username: String,
    /// Rating, 0 to 5
    pub stars: u8,
    /// Free text body
    pub text: String,
    /// Last edit
    pub date: DateTime<Utc>,
    /// Resolved book reference
    pub book: Book,
}

/// Body of `POST /api/reviews` and `PUT /api/reviews`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Reviewed book's ISBN
    pub isbn: String,
    /// Reviewer
    pub username: String,
    /// Rating; range checked by [`ReviewRequest::validated_stars`]
    pub stars: i64,
    /// Free text body
    #[serde(default)]
    pub text: String,
}

impl ReviewRequest {
    /// Validate the request and return the rating as stored
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank keys or a rating outside 0-5
    pub fn validated_stars(&self) -> AppResult<u8> {
        validate_isbn(&self.isbn)?;
        validate_username(&self.username)?;

        u8::try_from(self.stars)
            .ok()
            .filter(|stars| *stars <= MAX_STARS)
            .ok_or_else(|| AppError::validation(format!("Stars must be between 0 and {MAX_STARS}.")))
    }
}
