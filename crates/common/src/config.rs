//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size for list endpoints
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination defaults applied by listing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,
    pub database_max_connections: u32,

    /// JWT signing configuration
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    pub jwt_ttl_seconds: u64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
    pub request_timeout_secs: u64,

    pub pagination: PaginationConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let default_page_size = parse_or("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1);
        let max_page_size = parse_or("MAX_PAGE_SIZE", MAX_PAGE_SIZE).max(default_page_size);

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: env::var("JWT_ISSUER").ok(),
            jwt_audience: env::var("JWT_AUDIENCE").ok(),
            jwt_ttl_seconds: parse_or("JWT_TTL_SECONDS", 3600),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "moveshare=debug".to_string()),
            port: parse_or("PORT", 8080),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30),

            pagination: PaginationConfig {
                default_page_size,
                max_page_size,
            },
        };

        Ok(config)
    }
}

/// Parse an optional environment variable, falling back to `default` when unset or malformed
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
