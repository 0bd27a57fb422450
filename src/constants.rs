// ABOUTME: System-wide constants and environment-backed configuration defaults
// ABOUTME: Re-exports core constants and reads deployment settings from the environment
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! This module provides both hardcoded constants and environment variable configuration.

pub use bookshelf_core::constants::{google_books, limits, messages, service_names};

use std::env;

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Defaults for values that have no natural zero
pub mod defaults {
    /// Default database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/bookshelf.db";
    /// Secret used outside production when `JWT_SECRET` is unset
    pub const DEVELOPMENT_JWT_SECRET: &str = "bookshelf-development-secret";
}

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env, google_books, limits, ports};

    /// Get `HTTP` server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(ports::DEFAULT_HTTP_PORT)
    }

    /// Get database `URL` from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DEFAULT_DATABASE_URL.into())
    }

    /// Get the `JWT` signing secret, if configured
    #[must_use]
    pub fn jwt_secret() -> Option<String> {
        env::var("JWT_SECRET").ok().filter(|secret| !secret.is_empty())
    }

    /// Get `JWT` expiry hours from environment or default
    #[must_use]
    pub fn jwt_expiry_hours() -> i64 {
        env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(limits::DEFAULT_JWT_EXPIRY_HOURS)
    }

    /// Get bcrypt cost from environment or the library default
    #[must_use]
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST)
    }

    /// Get the popularity window in days
    #[must_use]
    pub fn popular_window_days() -> i64 {
        env::var("POPULAR_WINDOW_DAYS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(limits::POPULAR_WINDOW_DAYS)
    }

    /// Get the Google Books base `URL`
    #[must_use]
    pub fn google_books_base_url() -> String {
        env::var("GOOGLE_BOOKS_BASE_URL").unwrap_or_else(|_| google_books::DEFAULT_BASE_URL.into())
    }

    /// Get the optional Google Books `API` key
    #[must_use]
    pub fn google_books_api_key() -> Option<String> {
        env::var("GOOGLE_BOOKS_API_KEY").ok().filter(|key| !key.is_empty())
    }

    /// Get the metadata cache lifetime in seconds
    #[must_use]
    pub fn google_books_cache_ttl() -> u64 {
        env::var("GOOGLE_BOOKS_CACHE_TTL")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(google_books::DEFAULT_CACHE_TTL_SECS)
    }

    /// Get allowed `CORS` origins (comma separated, `*` for any)
    #[must_use]
    pub fn cors_allowed_origins() -> String {
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into())
    }

    /// Get deployment environment name
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
    }
}
