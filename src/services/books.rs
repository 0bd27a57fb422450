// ABOUTME: Book lookup, creation, metadata search, and the three ranking aggregations
// ABOUTME: Resolves result limits and the popularity window before querying the store
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::external::{BookMetadataProvider, SearchField};
use crate::models::{Book, PopularBook, RatedBook, ReadingStatus, RecentBook, ResultLimit};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{info, instrument};

/// Search the metadata provider; an empty limit short-circuits to no results
///
/// # Errors
///
/// Returns an external service error if the provider fails
#[instrument(skip(provider))]
pub async fn search_books(
    provider: &dyn BookMetadataProvider,
    field: SearchField,
    keyword: &str,
    limit: ResultLimit,
) -> AppResult<Vec<Book>> {
    match limit.count() {
        Some(count) => provider.search(field, keyword, count).await,
        None => Ok(Vec::new()),
    }
}

/// Get a stored book
///
/// # Errors
///
/// Returns an error if the store fails
pub async fn get_book(db: &Database, isbn: &str) -> AppResult<Option<Book>> {
    db.books().get(isbn).await
}

/// Validate and store a book
///
/// # Errors
///
/// Returns a validation error, a conflict if the ISBN is taken, or a store error
#[instrument(skip(db, book), fields(isbn = %book.isbn))]
pub async fn add_book(db: &Database, book: &Book) -> AppResult<()> {
    book.validate()?;
    db.books().create(book).await?;
    info!("Added book");
    Ok(())
}

/// Books ranked by mean review rating
///
/// # Errors
///
/// Returns an error if the aggregation fails
pub async fn get_highest_rated_books(db: &Database, limit: ResultLimit) -> AppResult<Vec<RatedBook>> {
    match limit.count() {
        Some(count) => db.rankings().highest_rated(count).await,
        None => Ok(Vec::new()),
    }
}

/// Books ranked by their most recent status change
///
/// `status` narrows the statuses considered; `None` considers all of them.
///
/// # Errors
///
/// Returns an error if the aggregation fails
pub async fn get_recently_updated_books(
    db: &Database,
    status: Option<ReadingStatus>,
    limit: ResultLimit,
) -> AppResult<Vec<RecentBook>> {
    match limit.count() {
        Some(count) => db.rankings().recently_updated(status, count).await,
        None => Ok(Vec::new()),
    }
}

/// Books ranked by status changes in the trailing `window_days` before `now`
///
/// # Errors
///
/// Returns a configuration error if the window reaches outside the calendar,
/// or an error if the aggregation fails
pub async fn get_popular_books(
    db: &Database,
    status: Option<ReadingStatus>,
    limit: ResultLimit,
    window_days: i64,
    now: DateTime<Utc>,
) -> AppResult<Vec<PopularBook>> {
    let Some(count) = limit.count() else {
        return Ok(Vec::new());
    };
    let since = TimeDelta::try_days(window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| {
            AppError::config(format!("Popularity window of {window_days} days is out of range"))
        })?;
    db.rankings().popular(status, since, count).await
}
