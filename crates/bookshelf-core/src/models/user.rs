// ABOUTME: User account models: public profile, registration, update, and login bodies
// ABOUTME: The password hash never appears in any type that is serialized to clients
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::AppResult;
use crate::validation::{validate_email, validate_password, validate_username};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique username
    pub username: String,
    /// Unique e-mail address
    pub email: String,
    /// Date the account was created
    pub joined: NaiveDate,
}

/// Body of `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    /// Desired username
    pub username: String,
    /// E-mail address
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

impl RegisterUserRequest {
    /// Validate all fields
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Body of `PUT /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// Account to update
    pub username: String,
    /// New e-mail address
    pub email: String,
    /// New plaintext password
    pub password: String,
}

impl UpdateUserRequest {
    /// Validate the new e-mail and password
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Body of `POST /api/users/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// Issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed JWT
    pub token: String,
    /// Token expiry
    pub expires_at: DateTime<Utc>,
}
