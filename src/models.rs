// ABOUTME: Domain models for books, reviews, statuses, users, and rankings
// ABOUTME: Re-exported from bookshelf-core for use throughout the server crate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub use bookshelf_core::models::*;
