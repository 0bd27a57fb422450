// ABOUTME: Token authentication for mutating endpoints
// ABOUTME: Extracts the JWT from Authorization or x-access-token and checks it against the acted-upon user
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::AuthManager;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use http::{header::AUTHORIZATION, HeaderMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Legacy header some clients still send the raw token in
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Caller identity proven by a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Token subject
    pub username: String,
}

impl AuthenticatedUser {
    /// Require that the token was issued to `username`
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the token belongs to someone else
    pub fn ensure_is(&self, username: &str) -> AppResult<()> {
        if self.username == username {
            Ok(())
        } else {
            warn!(
                token_user = %self.username,
                requested_user = %username,
                "Token subject does not match requested user"
            );
            Err(AppError::auth_invalid("Token does not belong to this user"))
        }
    }
}

/// Pull the raw token from the request headers, preferring `Authorization: Bearer`
fn extract_token(headers: &HeaderMap) -> AppResult<Option<&str>> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AppError::auth_malformed("Authorization header is not valid text"))?;
        return value.strip_prefix("Bearer ").map(Some).ok_or_else(|| {
            AppError::auth_malformed("Invalid authorization header format, expected 'Bearer <token>'")
        });
    }

    headers
        .get(ACCESS_TOKEN_HEADER)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::auth_malformed("Access token header is not valid text"))
        })
        .transpose()
}

/// Authenticate a request from its headers
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` without a token, or the token's validation error
pub fn authenticate_headers(
    headers: &HeaderMap,
    auth_manager: &AuthManager,
) -> AppResult<AuthenticatedUser> {
    let token = extract_token(headers)?
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(AppError::auth_required)?;

    let claims = auth_manager.validate_token(token)?;
    debug!(user = %claims.sub, "Request authenticated");

    Ok(AuthenticatedUser {
        username: claims.sub,
    })
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        authenticate_headers(&parts.headers, &resources.auth_manager)
    }
}
