// ABOUTME: Core data models for books, reviews, reading statuses, users, and rankings
// ABOUTME: Plain serde records shared by the store, the services, and the HTTP layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Domain models
//!
//! Reviews and statuses are keyed by the compound `(isbn, username)` pair and
//! always carry the resolved [`Book`] they reference.

mod book;
mod ranking;
mod review;
mod status;
mod user;

pub use book::Book;
pub use ranking::{PopularBook, RatedBook, RecentBook, ResultLimit};
pub use review::{Review, ReviewRequest};
pub use status::{BookStatus, ReadingStatus, StatusRequest, UpdateStatusRequest};
pub use user::{LoginRequest, LoginResponse, RegisterUserRequest, UpdateUserRequest, UserProfile};

use serde::{Deserialize, Serialize};

/// Body returned by successful mutations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
