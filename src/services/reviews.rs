// ABOUTME: Review business logic: existence checks before writes and keyed lookups
// ABOUTME: One review per (isbn, username); writes stamp the current time
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Review, ReviewRequest};
use chrono::Utc;
use tracing::{info, instrument};

/// All reviews, newest first
///
/// # Errors
///
/// Returns an error if the store fails
pub async fn get_reviews(db: &Database) -> AppResult<Vec<Review>> {
    db.reviews().list_all().await
}

/// Reviews of one book, newest first
///
/// # Errors
///
/// Returns an error if the store fails
pub async fn get_book_reviews(db: &Database, isbn: &str) -> AppResult<Vec<Review>> {
    db.reviews().list_for_book(isbn).await
}

/// The review `username` wrote for `isbn`
///
/// # Errors
///
/// Returns an error if the store fails
pub async fn get_review(db: &Database, username: &str, isbn: &str) -> AppResult<Option<Review>> {
    db.reviews().get(username, isbn).await
}

/// Add a review
///
/// # Errors
///
/// Returns a validation error for a bad rating, a conflict if the review exists,
/// not-found if the book or user is missing, or a store error
#[instrument(skip(db, request), fields(isbn = %request.isbn, username = %request.username))]
pub async fn add_review(db: &Database, request: &ReviewRequest) -> AppResult<()> {
    let stars = request.validated_stars()?;
    let reviews = db.reviews();

    if reviews.get(&request.username, &request.isbn).await?.is_some() {
        return Err(AppError::already_exists("Review already exists."));
    }
    ensure_book_and_user(db, &request.isbn, &request.username).await?;

    reviews
        .create(
            &request.isbn,
            &request.username,
            stars,
            &request.text,
            Utc::now(),
        )
        .await?;

    info!(stars, "Added review");
    Ok(())
}

/// Replace the rating and text of an existing review
///
/// # Errors
///
/// Returns a validation error for a bad rating, not-found if there is no such
/// review, or a store error
#[instrument(skip(db, request), fields(isbn = %request.isbn, username = %request.username))]
pub async fn update_review(db: &Database, request: &ReviewRequest) -> AppResult<()> {
    let stars = request.validated_stars()?;

    let updated = db
        .reviews()
        .update(
            &request.isbn,
            &request.username,
            stars,
            &request.text,
            Utc::now(),
        )
        .await?;
    if !updated {
        return Err(AppError::not_found("Review doesn't exist."));
    }

    info!(stars, "Updated review");
    Ok(())
}

/// Delete a review
///
/// # Errors
///
/// Returns not-found if there is no such review, or a store error
#[instrument(skip(db))]
pub async fn delete_review(db: &Database, username: &str, isbn: &str) -> AppResult<()> {
    if !db.reviews().delete(username, isbn).await? {
        return Err(AppError::not_found("Review doesn't exist."));
    }
    info!("Deleted review");
    Ok(())
}

/// Reviews and statuses may only reference stored books and users
pub(crate) async fn ensure_book_and_user(db: &Database, isbn: &str, username: &str) -> AppResult<()> {
    if db.books().exists(isbn).await? && db.users().exists(username).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Book or user doesn't exist."))
    }
}
