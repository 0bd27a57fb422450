// ABOUTME: Ranking result entries and the result-count limit shared by all rankings
// ABOUTME: Highest-rated, recently-updated, and popular books each carry their score
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::Book;
use crate::constants::limits::{DEFAULT_RESULT_LIMIT, MAX_ALLOWED_RESULTS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book with the mean of its review ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedBook {
    /// Resolved book
    pub book: Book,
    /// Arithmetic mean of all star ratings
    pub average_rating: f64,
}

/// A book with its most recent status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentBook {
    /// Resolved book
    pub book: Book,
    /// Most recent status date across all users
    pub date: DateTime<Utc>,
}

/// A book with the number of status changes inside the popularity window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularBook {
    /// Resolved book
    pub book: Book,
    /// Matching status records in the window
    pub count: u32,
}

/// Number of results a search or ranking may return
///
/// A requested limit below one means "nothing", which the HTTP layer reports as
/// no content rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLimit {
    /// Caller asked for zero or fewer results
    Empty,
    /// Between 1 and the allowed maximum
    Take(u32),
}

impl ResultLimit {
    /// Resolve a requested limit: default when absent, capped at the maximum
    #[must_use]
    pub fn resolve(requested: Option<i64>) -> Self {
        match requested {
            None => Self::Take(DEFAULT_RESULT_LIMIT),
            Some(value) if value < 1 => Self::Empty,
            Some(value) => Self::Take(
                u32::try_from(value)
                    .unwrap_or(MAX_ALLOWED_RESULTS)
                    .min(MAX_ALLOWED_RESULTS),
            ),
        }
    }

    /// Parse a raw query value
    ///
    /// Only the leading integer is read, so `"10abc"` means 10 and `"1.5"` means 1.
    /// A value without leading digits counts as a limit below one.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::resolve(None),
            Some(value) => Self::resolve(Some(leading_integer(value).unwrap_or(-1))),
        }
    }

    /// Limit as a count, `None` for [`ResultLimit::Empty`]
    #[must_use]
    pub const fn count(self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Take(count) => Some(count),
        }
    }
}

/// Signed integer prefix of `value`; digit runs too long for `i64` saturate
fn leading_integer(value: &str) -> Option<i64> {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
