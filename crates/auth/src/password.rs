//! Password hashing and verification
//!
//! bcrypt is CPU-bound, so both operations run on the blocking thread pool.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AuthError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// bcrypt only looks at the first 72 bytes
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Hash a password with bcrypt. `cost` defaults to `bcrypt::DEFAULT_COST`.
pub async fn hash_password(password: &str, cost: Option<u32>) -> Result<String, AuthError> {
    let password = password.to_string();
    let cost = cost.unwrap_or(DEFAULT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the hash itself is unusable.
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hashed).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}
