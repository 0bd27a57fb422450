// ABOUTME: Error types for the bookshelf server, re-exported from bookshelf-core
// ABOUTME: Keeps `crate::errors` as the single import path inside the server crate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub use bookshelf_core::errors::*;
