// ABOUTME: Test utilities for building databases, resources, and sample records
// ABOUTME: Centralizes test data creation to avoid duplication across unit and integration tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::{hash_password, AuthManager};
use crate::config::environment::{
    AuthConfig, CorsConfig, DatabaseConfig, Environment, GoogleBooksConfig, RankingConfig,
    ServerConfig,
};
use crate::database::Database;
use crate::errors::AppResult;
use crate::external::{BookMetadataProvider, SearchField};
use crate::models::Book;
use crate::resources::ServerResources;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

/// Secret shared by test token managers
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-bookshelf";

/// Lowest cost bcrypt accepts, keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a migrated in-memory database
///
/// # Errors
///
/// Returns an error if database initialization fails
pub async fn create_test_database() -> AppResult<Database> {
    Database::new("sqlite::memory:").await
}

/// Configuration suitable for tests
#[must_use]
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_owned(),
            jwt_expiry_hours: 1,
            bcrypt_cost: TEST_BCRYPT_COST,
        },
        google_books: GoogleBooksConfig {
            base_url: "http://127.0.0.1:9/books/v1".to_owned(),
            api_key: None,
            cache_ttl_secs: 60,
        },
        cors: CorsConfig {
            allowed_origins: "*".to_owned(),
        },
        rankings: RankingConfig {
            popular_window_days: 30,
        },
    }
}

/// Metadata provider answering from a fixed catalog
///
/// Title searches match on a case-insensitive title substring, author
/// searches on any author containing the keyword.
#[derive(Debug, Default)]
pub struct StaticMetadataProvider {
    catalog: Vec<Book>,
    calls: Mutex<Vec<(SearchField, String, u32)>>,
}

impl StaticMetadataProvider {
    /// Provider over `catalog`
    #[must_use]
    pub fn new(catalog: Vec<Book>) -> Self {
        Self {
            catalog,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Searches received so far
    #[must_use]
    pub fn calls(&self) -> Vec<(SearchField, String, u32)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BookMetadataProvider for StaticMetadataProvider {
    async fn search(&self, field: SearchField, keyword: &str, limit: u32) -> AppResult<Vec<Book>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((field, keyword.to_owned(), limit));
        }

        let needle = keyword.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|book| match field {
                SearchField::Title => book.title.to_lowercase().contains(&needle),
                SearchField::Author => book
                    .authors
                    .iter()
                    .any(|author| author.to_lowercase().contains(&needle)),
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Resources over a fresh in-memory database and the given provider
///
/// # Errors
///
/// Returns an error if database initialization fails
pub async fn create_test_resources(
    metadata_provider: Arc<dyn BookMetadataProvider>,
) -> AppResult<Arc<ServerResources>> {
    let config = create_test_config();
    let database = create_test_database().await?;
    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.jwt_expiry_hours,
    );
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        metadata_provider,
        Arc::new(config),
    )))
}

/// Resources with an empty catalog
///
/// # Errors
///
/// Returns an error if database initialization fails
pub async fn create_default_test_resources() -> AppResult<Arc<ServerResources>> {
    create_test_resources(Arc::new(StaticMetadataProvider::default())).await
}

/// A complete, valid book
#[must_use]
pub fn sample_book(isbn: &str) -> Book {
    Book {
        isbn: isbn.to_owned(),
        title: format!("Sample Book {isbn}"),
        authors: vec!["Test Author".to_owned()],
        cover: "https://books.google.com/books/content?id=test&img=1".to_owned(),
        pages: 320,
        published: "2001-05-17".to_owned(),
        publisher: "Test House".to_owned(),
        language: "en".to_owned(),
        description: "A book used in tests.".to_owned(),
        categories: vec!["Fiction".to_owned()],
    }
}

/// Store a user directly, bypassing request validation
///
/// # Errors
///
/// Returns an error if hashing or the insert fails
pub async fn create_test_user(database: &Database, username: &str, password: &str) -> AppResult<()> {
    let hash = hash_password(password, TEST_BCRYPT_COST).await?;
    database
        .users()
        .create(
            username,
            &format!("{username}@example.com"),
            &hash,
            Utc::now().date_naive(),
        )
        .await
}

/// Issue a token for `username` from the resources' manager
///
/// # Errors
///
/// Returns an error if signing fails
pub fn token_for(resources: &ServerResources, username: &str) -> AppResult<String> {
    resources
        .auth_manager
        .generate_token(username)
        .map(|(token, _)| token)
}
