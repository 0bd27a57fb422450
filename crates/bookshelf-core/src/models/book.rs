// ABOUTME: Book record keyed by ISBN with metadata from the public book API
// ABOUTME: Validates required fields and the partial published-date format
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use crate::validation::{is_valid_published_date, validate_isbn};
use serde::{Deserialize, Serialize};

/// A book, identified by its ISBN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// ISBN-13, ISBN-10, or another industry identifier
    pub isbn: String,
    /// Title
    pub title: String,
    /// Author names
    pub authors: Vec<String>,
    /// Cover image URL
    pub cover: String,
    /// Page count
    pub pages: u32,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    pub published: String,
    /// Publisher
    pub publisher: String,
    /// Language code
    pub language: String,
    /// Description
    pub description: String,
    /// Subject categories
    pub categories: Vec<String>,
}

impl Book {
    /// Check the fields the store requires
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        validate_isbn(&self.isbn)?;

        let required = [
            ("title", &self.title),
            ("cover", &self.cover),
            ("publisher", &self.publisher),
            ("language", &self.language),
            ("description", &self.description),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AppError::validation(format!("Book {field} is required.")));
        }

        if self.authors.is_empty() {
            return Err(AppError::validation("Book authors are required."));
        }
        if self.categories.is_empty() {
            return Err(AppError::validation("Book categories are required."));
        }
        if !is_valid_published_date(&self.published) {
            return Err(AppError::validation(format!(
                "Published date '{}' must be YYYY, YYYY-MM or YYYY-MM-DD.",
                self.published
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book {
            isbn: "9780261103573".to_owned(),
            title: "The Fellowship of the Ring".to_owned(),
            authors: vec!["J. R. R. Tolkien".to_owned()],
            cover: "https://books.google.com/cover.jpg".to_owned(),
            pages: 448,
            published: "1954-07".to_owned(),
            publisher: "Allen & Unwin".to_owned(),
            language: "en".to_owned(),
            description: "The first volume.".to_owned(),
            categories: vec!["Fiction".to_owned()],
        }
    }

    #[test]
    fn test_valid_book() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_published_date() {
        let book = Book {
            published: "07/1954".to_owned(),
            ..sample()
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_authors() {
        let book = Book {
            authors: Vec::new(),
            ..sample()
        };
        let err = book.validate().unwrap_err();
        assert!(err.message.contains("authors"));
    }
}
