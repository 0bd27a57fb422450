// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Database handle, token manager, metadata provider, and configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::external::{BookMetadataProvider, GoogleBooksClient, GoogleBooksClientConfig};
use std::sync::Arc;

/// Dependencies shared across request handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Record store
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Book search backend
    pub metadata_provider: Arc<dyn BookMetadataProvider>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        metadata_provider: Arc<dyn BookMetadataProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            metadata_provider,
            config,
        }
    }

    /// Connect the database and build every dependency from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database.url).await?;
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        );
        let metadata_provider: Arc<dyn BookMetadataProvider> =
            Arc::new(GoogleBooksClient::new(GoogleBooksClientConfig {
                base_url: config.google_books.base_url.clone(),
                api_key: config.google_books.api_key.clone(),
                cache_ttl_secs: config.google_books.cache_ttl_secs,
            }));

        Ok(Self::new(
            database,
            auth_manager,
            metadata_provider,
            Arc::new(config),
        ))
    }
}
