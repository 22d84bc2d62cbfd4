//! Account API handlers
//!
//! Implements:
//! - POST /sign-up - Register a new user
//! - POST /login - Exchange credentials for an access token
//! - GET /v1/account - Get current user profile

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use moveshare_auth::password::{hash_password, verify_password};
use moveshare_auth::{issue_token, AuthUser};
use moveshare_common::{Error, RepositoryError, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::UsersState;
use crate::domain::entities::{NewUser, User};

/// Response for user profile operations
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Request for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

fn invalid_credentials() -> Error {
    Error::Authentication("Invalid credentials".to_string())
}

/// POST /sign-up - Register a new user
pub async fn sign_up(
    State(state): State<UsersState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let new_user = NewUser::new(req.email, req.username, req.password)?;

    if state
        .repos
        .users
        .exists(&new_user.email, &new_user.username)
        .await?
    {
        tracing::warn!(email = %new_user.email, username = %new_user.username, "User already exists");
        return Err(Error::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(&new_user.password, None)
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    // A concurrent sign-up can still win the race; the unique index reports it
    let user = state
        .repos
        .users
        .create(&new_user.email, &new_user.username, &password_hash)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => Error::Conflict("User already exists".to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, email = %user.email, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /login - Exchange credentials for an access token
pub async fn login(
    State(state): State<UsersState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = req.email.trim().to_lowercase();

    let user = state
        .repos
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let matches = verify_password(&req.password, &user.password_hash)
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;
    if !matches {
        return Err(invalid_credentials());
    }

    let config = state.auth.config();
    let access_token = issue_token(user.id, &user.email, config)
        .map_err(|e| Error::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: config.token_ttl_seconds,
    }))
}

/// GET /v1/account - Get current user profile
pub async fn get_profile(
    AuthUser(ctx): AuthUser,
    State(state): State<UsersState>,
) -> Result<Json<UserResponse>> {
    let user = state
        .repos
        .users
        .get_by_id(ctx.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}
