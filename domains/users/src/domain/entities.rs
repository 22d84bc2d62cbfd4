//! Domain entities for the MoveShare users domain

use chrono::{DateTime, Utc};
use moveshare_auth::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use moveshare_common::{Error, Result};
use serde::Serialize;
use validator::ValidateEmail;

use crate::domain::validation::validate_username;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account details accepted at sign-up, before hashing
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl NewUser {
    /// Create a new sign-up request with validation
    pub fn new(email: String, username: String, password: String) -> Result<Self> {
        let email = email.trim().to_lowercase();
        let username = username.trim().to_string();

        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if !validate_username(&username) {
            return Err(Error::Validation(
                "Username must be 3-32 letters, digits, '_', '.' or '-'".to_string(),
            ));
        }

        if password.len() < MIN_PASSWORD_LENGTH || password.len() > MAX_PASSWORD_LENGTH {
            return Err(Error::Validation(format!(
                "Password must be {}-{} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        Ok(Self {
            email,
            username,
            password,
        })
    }
}
