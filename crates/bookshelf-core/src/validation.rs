// ABOUTME: Field validation for books, reviews, statuses, and user accounts
// ABOUTME: Regex-backed checks for published dates and e-mail addresses plus length rules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::limits::{PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN};
use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; the metadata API is inconsistent about precision
const PUBLISHED_DATE_PATTERN: &str =
    r"^\d{4}(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$";

/// WHATWG "valid e-mail address"
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static PUBLISHED_DATE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}

/// Whether a published date has year, year-month, or year-month-day precision
#[must_use]
pub fn is_valid_published_date(value: &str) -> bool {
    matches(&PUBLISHED_DATE_REGEX, PUBLISHED_DATE_PATTERN, value)
}

/// Whether an e-mail address is syntactically valid
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    matches(&EMAIL_REGEX, EMAIL_PATTERN, value)
}

/// Reject empty ISBNs
///
/// # Errors
///
/// Returns a validation error when the ISBN is blank
pub fn validate_isbn(isbn: &str) -> AppResult<()> {
    if isbn.trim().is_empty() {
        return Err(AppError::validation("ISBN is required."));
    }
    Ok(())
}

/// Usernames are 2 to 20 characters
///
/// # Errors
///
/// Returns a validation error when the username length is out of range
pub fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters."
        )));
    }
    Ok(())
}

/// Validate an e-mail address
///
/// # Errors
///
/// Returns a validation error for malformed addresses
pub fn validate_email(email: &str) -> AppResult<()> {
    if !is_valid_email(email) {
        return Err(AppError::validation("E-mail address is invalid."));
    }
    Ok(())
}

/// Plaintext passwords need at least 8 characters
///
/// # Errors
///
/// Returns a validation error for short passwords
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters."
        )));
    }
    Ok(())
}
