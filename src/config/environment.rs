// ABOUTME: Environment-based server configuration for the bookshelf API
// ABOUTME: Type-safe sections for database, auth, metadata API, CORS, and rankings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration management for production deployment

use crate::constants::google_books::MAX_CACHE_TTL_SECS;
use crate::constants::limits::{
    MAX_BCRYPT_COST, MAX_JWT_EXPIRY_HOURS, MAX_POPULAR_WINDOW_DAYS, MIN_BCRYPT_COST,
};
use crate::constants::{defaults, env_config};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `sqlx` connection URL (`sqlite:./data/bookshelf.db`, `sqlite::memory:`)
    pub url: String,
}

/// Token and password hashing configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Google Books client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleBooksConfig {
    /// API base, e.g. `https://www.googleapis.com/books/v1`
    pub base_url: String,
    /// Optional API key; anonymous access works with a lower quota
    pub api_key: Option<String>,
    /// Response cache lifetime
    pub cache_ttl_secs: u64,
}

impl fmt::Debug for GoogleBooksConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleBooksConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

/// Ranking configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Trailing window for the popular ranking
    pub popular_window_days: i64,
}

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Token and hashing settings
    pub auth: AuthConfig,
    /// Metadata API settings
    pub google_books: GoogleBooksConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Ranking settings
    pub rankings: RankingConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables, seeding from `.env` when present
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or a production secret is missing
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let environment = Environment::from_str_or_default(&env_config::environment());

        let jwt_secret = match env_config::jwt_secret() {
            Some(secret) => secret,
            None if environment.is_production() => {
                bail!("JWT_SECRET must be set in production")
            }
            None => {
                warn!("JWT_SECRET not set; using the development secret");
                defaults::DEVELOPMENT_JWT_SECRET.to_owned()
            }
        };

        let config = Self {
            http_port: env_config::http_port(),
            environment,
            database: DatabaseConfig {
                url: env_config::database_url(),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_config::jwt_expiry_hours(),
                bcrypt_cost: env_config::bcrypt_cost(),
            },
            google_books: GoogleBooksConfig {
                base_url: env_config::google_books_base_url(),
                api_key: env_config::google_books_api_key(),
                cache_ttl_secs: env_config::google_books_cache_ttl(),
            },
            cors: CorsConfig {
                allowed_origins: env_config::cors_allowed_origins(),
            },
            rankings: RankingConfig {
                popular_window_days: env_config::popular_window_days(),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&self.auth.jwt_expiry_hours) {
            bail!("JWT_EXPIRY_HOURS must be between 1 and {MAX_JWT_EXPIRY_HOURS}");
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            bail!("BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}");
        }
        if !(1..=MAX_POPULAR_WINDOW_DAYS).contains(&self.rankings.popular_window_days) {
            bail!("POPULAR_WINDOW_DAYS must be between 1 and {MAX_POPULAR_WINDOW_DAYS}");
        }
        if self.google_books.cache_ttl_secs > MAX_CACHE_TTL_SECS {
            bail!("GOOGLE_BOOKS_CACHE_TTL must be at most {MAX_CACHE_TTL_SECS} seconds");
        }
        if self.database.url.is_empty() {
            bail!("DATABASE_URL must not be empty");
        }
        Ok(())
    }

    /// One-line summary for startup logs; secrets are omitted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} database={} jwt_expiry_hours={} popular_window_days={} google_books={} cors={}",
            self.environment,
            self.http_port,
            self.database.url,
            self.auth.jwt_expiry_hours,
            self.rankings.popular_window_days,
            self.google_books.base_url,
            self.cors.allowed_origins,
        )
    }
}
