// ABOUTME: Core types and constants for the Bookshelf reading tracker
// ABOUTME: Foundation crate with error handling, domain models, validation, and constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Bookshelf Core
//!
//! Foundation crate providing shared types and constants for the Bookshelf
//! server. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Books, reviews, reading statuses, users, and ranking entries
//! - **validation**: Field validation shared by the store and the HTTP layer

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (Book, Review, `BookStatus`, `UserProfile`, rankings)
pub mod models;

/// Field validation (ISBN, published dates, e-mail, usernames, passwords)
pub mod validation;
