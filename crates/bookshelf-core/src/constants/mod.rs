// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for limits, ranking windows, and the book metadata API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Service identification
pub mod service_names {
    /// Service name used in logs and tokens
    pub const BOOKSHELF_SERVER: &str = "bookshelf-server";
}

/// Result-count and field-length limits
pub mod limits {
    /// Default number of results for searches and rankings
    pub const DEFAULT_RESULT_LIMIT: u32 = 15;
    /// Upper bound on results (the metadata API refuses more than this)
    pub const MAX_ALLOWED_RESULTS: u32 = 40;
    /// Days a status change keeps counting towards popularity
    pub const POPULAR_WINDOW_DAYS: i64 = 30;
    /// Longest accepted popularity window (about a century)
    pub const MAX_POPULAR_WINDOW_DAYS: i64 = 36_500;
    /// Highest review rating
    pub const MAX_STARS: u8 = 5;
    /// Minimum username length
    pub const USERNAME_MIN_LEN: usize = 2;
    /// Maximum username length
    pub const USERNAME_MAX_LEN: usize = 20;
    /// Minimum plaintext password length
    pub const PASSWORD_MIN_LEN: usize = 8;
    /// Default JWT lifetime
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
    /// Longest accepted JWT lifetime (one year)
    pub const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 365;
    /// Lowest bcrypt work factor the hasher accepts
    pub const MIN_BCRYPT_COST: u32 = 4;
    /// Highest bcrypt work factor the hasher accepts
    pub const MAX_BCRYPT_COST: u32 = 31;
}

/// Google Books API constants
pub mod google_books {
    /// Public API base
    pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";
    /// Query field for title searches
    pub const TITLE_FIELD: &str = "intitle";
    /// Query field for author searches
    pub const AUTHOR_FIELD: &str = "inauthor";
    /// Preferred identifier type
    pub const ISBN_13: &str = "ISBN_13";
    /// Fallback identifier type
    pub const ISBN_10: &str = "ISBN_10";
    /// Cover used for volumes without a thumbnail
    pub const PLACEHOLDER_COVER: &str = "/assets/images/placeholder_cover.jpg";
    /// Page-curl decoration appended to thumbnail URLs
    pub const EDGE_CURL_PARAM: &str = "&edge=curl";
    /// Default response cache lifetime
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
    /// Longest accepted response cache lifetime (one week)
    pub const MAX_CACHE_TTL_SECS: u64 = 7 * 24 * 3600;
    /// Distinct searches kept in the response cache
    pub const MAX_CACHED_SEARCHES: usize = 1000;
}

/// Messages returned by successful mutations
pub mod messages {
    /// Book created
    pub const BOOK_ADDED: &str = "Added book.";
    /// Review created
    pub const REVIEW_ADDED: &str = "Added review.";
    /// Review updated
    pub const REVIEW_UPDATED: &str = "Updated review.";
    /// Review deleted
    pub const REVIEW_DELETED: &str = "Deleted review.";
    /// Status created
    pub const STATUS_ADDED: &str = "Added status.";
    /// Status updated
    pub const STATUS_UPDATED: &str = "Updated status.";
    /// Status deleted
    pub const STATUS_DELETED: &str = "Deleted status.";
    /// User created
    pub const USER_ADDED: &str = "Added user.";
    /// User updated
    pub const USER_UPDATED: &str = "Updated user.";
}
