// ABOUTME: Business logic for books, reviews, statuses, and users extracted from route handlers
// ABOUTME: Free functions over the database handle; routes only translate outcomes to HTTP
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Service layer
//!
//! Lookups return `Option`/`Vec` and leave "nothing found" to the caller;
//! mutations return `AppResult<()>` with conflicts and missing references as
//! typed errors.

/// Book lookup, creation, search, and rankings
pub mod books;
/// Review CRUD
pub mod reviews;
/// Reading status CRUD
pub mod statuses;
/// Accounts and login
pub mod users;
