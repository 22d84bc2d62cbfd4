//! Shared utilities, configuration, and error handling for MoveShare
//!
//! This crate provides common functionality used across the MoveShare backend:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Pagination and validated-JSON extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::{Config, PaginationConfig};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Page, Pagination, ValidatedJson};
pub use state::StateError;
