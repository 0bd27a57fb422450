// ABOUTME: External API clients for book metadata
// ABOUTME: Provider trait consumed by the search routes and the Google Books implementation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Google Books API client
pub mod google_books;

pub use google_books::{GoogleBooksClient, GoogleBooksClientConfig};

use crate::constants::google_books::{AUTHOR_FIELD, TITLE_FIELD};
use crate::errors::AppResult;
use crate::models::Book;
use async_trait::async_trait;
use std::fmt;

/// Which volume field a search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Title keywords
    Title,
    /// Author name
    Author,
}

impl SearchField {
    /// Query prefix understood by the metadata API
    #[must_use]
    pub const fn query_prefix(self) -> &'static str {
        match self {
            Self::Title => TITLE_FIELD,
            Self::Author => AUTHOR_FIELD,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Author => write!(f, "author"),
        }
    }
}

/// Source of book metadata for searches
#[async_trait]
pub trait BookMetadataProvider: Send + Sync {
    /// Search for at most `limit` books whose `field` matches `keyword`
    ///
    /// # Errors
    ///
    /// Returns an external service error if the upstream call fails
    async fn search(&self, field: SearchField, keyword: &str, limit: u32) -> AppResult<Vec<Book>>;
}
