// ABOUTME: Configuration module for the bookshelf server
// ABOUTME: Environment-driven settings loaded once at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Environment variable parsing into `ServerConfig`
pub mod environment;

pub use environment::ServerConfig;
