// ABOUTME: Reading status business logic, including adding the book alongside a new status
// ABOUTME: One status per (isbn, username); writes stamp the current time
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::books::add_book;
use super::reviews::ensure_book_and_user;
use crate::database::Database;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{BookStatus, ReadingStatus, StatusRequest, UpdateStatusRequest};
use chrono::Utc;
use tracing::{debug, info, instrument};

/// A user's statuses, optionally only those with one status code
///
/// # Errors
///
/// Returns an error if the store fails
pub async fn get_statuses(
    db: &Database,
    username: &str,
    status: Option<ReadingStatus>,
) -> AppResult<Vec<BookStatus>> {
    db.statuses().list_for_user(username, status).await
}

/// A user's status for one book
///
/// # Errors
///
/// Returns an error if the store fails
pub async fn get_status(db: &Database, username: &str, isbn: &str) -> AppResult<Option<BookStatus>> {
    db.statuses().get(username, isbn).await
}

/// Add a status, storing the accompanying book first when one is supplied
///
/// The book is added on a best-effort basis: a book that is already stored or
/// fails validation is skipped, and the reference check that follows decides
/// whether the status can be added.
///
/// # Errors
///
/// Returns a validation error for a bad status code, a conflict if the status
/// exists, not-found if the book or user is missing, or a store error
#[instrument(skip(db, request), fields(isbn = %request.isbn, username = %request.username))]
pub async fn add_status(db: &Database, request: &StatusRequest) -> AppResult<()> {
    let status = request.validated_status()?;
    let statuses = db.statuses();

    if statuses.get(&request.username, &request.isbn).await?.is_some() {
        return Err(AppError::already_exists("Status already exists."));
    }

    if let Some(book) = &request.book {
        match add_book(db, book).await {
            Ok(()) => {}
            Err(e)
                if matches!(
                    e.code,
                    ErrorCode::ResourceAlreadyExists | ErrorCode::ValidationFailed
                ) =>
            {
                debug!(book_isbn = %book.isbn, reason = %e.message, "Skipped adding book with status");
            }
            Err(e) => return Err(e),
        }
    }

    ensure_book_and_user(db, &request.isbn, &request.username).await?;
    statuses
        .create(&request.isbn, &request.username, status, Utc::now())
        .await?;

    info!(%status, "Added status");
    Ok(())
}

/// Change the status code of an existing status
///
/// # Errors
///
/// Returns a validation error for a bad status code, not-found if there is no
/// such status, or a store error
#[instrument(skip(db, request), fields(isbn = %request.isbn, username = %request.username))]
pub async fn update_status(db: &Database, request: &UpdateStatusRequest) -> AppResult<()> {
    let status = request.validated_status()?;

    let updated = db
        .statuses()
        .update(&request.isbn, &request.username, status, Utc::now())
        .await?;
    if !updated {
        return Err(AppError::not_found("Status doesn't exist."));
    }

    info!(%status, "Updated status");
    Ok(())
}

/// Delete a status
///
/// # Errors
///
/// Returns not-found if there is no such status, or a store error
#[instrument(skip(db))]
pub async fn delete_status(db: &Database, username: &str, isbn: &str) -> AppResult<()> {
    if !db.statuses().delete(username, isbn).await? {
        return Err(AppError::not_found("Status doesn't exist."));
    }
    info!("Deleted status");
    Ok(())
}
