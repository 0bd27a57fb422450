// ABOUTME: Main library entry point for the bookshelf REST API
// ABOUTME: Books, reviews, reading statuses, user accounts, and rankings over SQLite
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Bookshelf Server
//!
//! A REST backend for a reading community. Readers register, log in, keep
//! reading statuses for books, and write star-rated reviews. The server
//! ranks books by average rating, by recent status activity, and by
//! popularity within a recent window, and proxies title/author searches to
//! the Google Books API.
//!
//! ## Architecture
//!
//! - **Routes**: axum routers per resource, merged under `/api`
//! - **Services**: business rules shared by the routes
//! - **Database**: SQLite via sqlx, one manager per table
//! - **Auth**: HS256 tokens and bcrypt password hashes
//! - **External**: Google Books metadata provider behind a trait
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bookshelf_server::config::environment::ServerConfig;
//! use bookshelf_server::resources::ServerResources;
//! use bookshelf_server::server::BookshelfServer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let port = config.http_port;
//!     let resources = Arc::new(ServerResources::from_config(config).await?);
//!     BookshelfServer::new(resources).run(port).await
//! }
//! ```

/// Token issuing, validation, and password hashing
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// Application constants and environment lookups
pub mod constants;

/// SQLite persistence layer
pub mod database;

/// Unified error handling
pub mod errors;

/// External metadata providers
pub mod external;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: authentication, CORS, request IDs
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Server lifecycle
pub mod server;

/// Business rules behind the routes
pub mod services;

/// Helpers for unit and integration tests
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
