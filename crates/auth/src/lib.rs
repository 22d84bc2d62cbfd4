//! Authentication for the MoveShare API
//!
//! Provides JWT issuance and validation, bcrypt password hashing, and axum
//! extractors that work with any domain state implementing `FromRef<S>` for
//! `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
pub mod password;

pub use backend::AuthBackend;
pub use claims::AccessClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use jwt::issue_token;
