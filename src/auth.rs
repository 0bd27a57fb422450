// ABOUTME: JWT issuing and validation plus bcrypt password hashing
// ABOUTME: HS256 tokens whose subject is the username they authorize
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authentication
//!
//! Tokens are HS256 `JWT`s signed with the configured secret. The subject is
//! the username; mutating endpoints compare it with the username they act on.
//! Passwords are hashed with bcrypt on the blocking thread pool.

use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::task;
use tracing::{debug, warn};

/// Why a token was rejected
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is not a well-formed `JWT`
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let minutes = current_time.signed_duration_since(*expired_at).num_minutes();
                write!(
                    f,
                    "JWT token expired {minutes} minutes ago at {}",
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { reason } => Self::auth_invalid(reason),
            JwtValidationError::TokenMalformed { details } => Self::auth_malformed(details),
        }
    }
}

/// `JWT` claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Issued at (seconds since the epoch)
    pub iat: i64,
    /// Expiration (seconds since the epoch)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Issues and validates tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create an authentication manager from the signing secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Issue a token for `username`, returning it with its expiry time
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the expiry lies outside the calendar,
    /// or an internal error if encoding fails
    pub fn generate_token(&self, username: &str) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = TimeDelta::try_hours(self.token_expiry_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::config(format!(
                    "Token lifetime of {} hours is out of range",
                    self.token_expiry_hours
                ))
            })?;

        let claims = Claims {
            sub: username.to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: service_names::BOOKSHELF_SERVER.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;

        Ok((token, expires_at))
    }

    /// Validate a token
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the token is malformed, forged, or expired
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        self.validate_token_detailed(token).map_err(AppError::from)
    }

    /// Validate a token, reporting exactly why it was rejected
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] describing the failure
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_issuer(&[service_names::BOOKSHELF_SERVER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| convert_jwt_error(&e))?;

        let current_time = Utc::now();
        if claims.exp <= current_time.timestamp() {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        debug!(user = %claims.sub, "JWT token validated");
        Ok(claims)
    }
}

fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
    use jsonwebtoken::errors::ErrorKind;
    warn!("JWT token validation failed: {:?}", e);

    match e.kind() {
        ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
            reason: "Token signature verification failed".into(),
        },
        ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
            details: "Token format is invalid".into(),
        },
        ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
            details: format!("Token contains invalid base64: {base64_err}"),
        },
        ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
            details: format!("Token contains invalid JSON: {json_err}"),
        },
        ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
            details: format!("Token contains invalid UTF-8: {utf8_err}"),
        },
        _ => JwtValidationError::TokenInvalid {
            reason: format!("Token validation failed: {e}"),
        },
    }
}

/// Hash a plaintext password on the blocking pool
///
/// # Errors
///
/// Returns an internal error if hashing fails or the task panics
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a plaintext password against a stored hash on the blocking pool
///
/// A malformed stored hash counts as a mismatch.
///
/// # Errors
///
/// Returns an internal error if the task panics
pub async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}
