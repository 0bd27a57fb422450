// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request harness and API fixtures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;

use axum::Router;
use bookshelf_server::{
    resources::ServerResources,
    routes,
    test_utils::{create_test_user, sample_book, token_for},
};
use std::sync::Arc;

/// Full application router over `resources`
pub fn app(resources: &Arc<ServerResources>) -> Router {
    routes::router(resources)
}

/// Store a user and return a token issued to them
pub async fn user_with_token(resources: &Arc<ServerResources>, username: &str) -> String {
    create_test_user(&resources.database, username, "password123")
        .await
        .expect("Failed to create test user");
    token_for(resources, username).expect("Failed to issue token")
}

/// Store a sample book
pub async fn stored_book(resources: &Arc<ServerResources>, isbn: &str) {
    resources
        .database
        .books()
        .create(&sample_book(isbn))
        .await
        .expect("Failed to store book");
}

/// `Authorization` header value for `token`
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
