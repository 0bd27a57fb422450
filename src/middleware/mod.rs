// ABOUTME: HTTP middleware for authentication, CORS, and request correlation
// ABOUTME: Layers and extractors applied by the router
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Token authentication extractor
pub mod auth;
/// CORS layer
pub mod cors;
/// Request ID propagation
pub mod request_id;

pub use auth::{authenticate_headers, AuthenticatedUser};
pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId};
