// ABOUTME: Account registration, profile lookup, credential updates, and login
// ABOUTME: Passwords are bcrypt-hashed before storage; login issues a JWT
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::{hash_password, verify_password, AuthManager};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{
    LoginRequest, LoginResponse, RegisterUserRequest, UpdateUserRequest, UserProfile,
};
use chrono::Utc;
use tracing::{info, instrument, warn};

/// A user's public profile
///
/// # Errors
///
/// Returns an error if the store fails
pub async fn get_user(db: &Database, username: &str) -> AppResult<Option<UserProfile>> {
    db.users().get_profile(username).await
}

/// Register a new account
///
/// # Errors
///
/// Returns a validation error for bad fields, a conflict if the username or
/// e-mail is taken, or a store error
#[instrument(skip(db, request), fields(username = %request.username))]
pub async fn register_user(
    db: &Database,
    request: &RegisterUserRequest,
    bcrypt_cost: u32,
) -> AppResult<()> {
    request.validate()?;
    let users = db.users();

    if users.exists(&request.username).await?
        || users
            .email_taken_by_other(&request.email, &request.username)
            .await?
    {
        return Err(AppError::already_exists("Username or e-mail already exists."));
    }

    let password_hash = hash_password(&request.password, bcrypt_cost).await?;
    users
        .create(
            &request.username,
            &request.email,
            &password_hash,
            Utc::now().date_naive(),
        )
        .await?;

    info!("Added user");
    Ok(())
}

/// Replace a user's e-mail and password
///
/// # Errors
///
/// Returns a validation error for bad fields, not-found if the user is
/// missing, a conflict if another account uses the e-mail, or a store error
#[instrument(skip(db, request), fields(username = %request.username))]
pub async fn update_user(
    db: &Database,
    request: &UpdateUserRequest,
    bcrypt_cost: u32,
) -> AppResult<()> {
    request.validate()?;
    let users = db.users();

    if !users.exists(&request.username).await? {
        return Err(AppError::not_found("User doesn't exist."));
    }
    if users
        .email_taken_by_other(&request.email, &request.username)
        .await?
    {
        return Err(AppError::already_exists("E-mail already exists."));
    }

    let password_hash = hash_password(&request.password, bcrypt_cost).await?;
    if !users
        .update(&request.username, &request.email, &password_hash)
        .await?
    {
        return Err(AppError::not_found("User doesn't exist."));
    }

    info!("Updated user");
    Ok(())
}

/// Check credentials and issue a token
///
/// Unknown users and wrong passwords are indistinguishable to the caller.
///
/// # Errors
///
/// Returns an authentication error for bad credentials, or a store error
#[instrument(skip(db, auth_manager, request), fields(username = %request.username))]
pub async fn login(
    db: &Database,
    auth_manager: &AuthManager,
    request: &LoginRequest,
) -> AppResult<LoginResponse> {
    let Some(password_hash) = db.users().get_password_hash(&request.username).await? else {
        warn!("Login for unknown user");
        return Err(AppError::auth_invalid("Invalid username or password"));
    };

    if !verify_password(&request.password, &password_hash).await? {
        warn!("Login with wrong password");
        return Err(AppError::auth_invalid("Invalid username or password"));
    }

    let (token, expires_at) = auth_manager.generate_token(&request.username)?;
    info!("User logged in");
    Ok(LoginResponse { token, expires_at })
}
