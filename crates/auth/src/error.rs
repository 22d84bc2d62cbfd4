//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header required")]
    MissingAuthorization,
    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid user ID in token")]
    InvalidUserId,
    #[error("User not found")]
    UserNotFound,
    #[error("Failed to load user")]
    UserLoadError,
    #[error("Failed to issue token")]
    TokenIssueFailed,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::MissingAuthorization => (StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION"),
            AuthError::InvalidAuthorizationFormat => {
                (StatusCode::UNAUTHORIZED, "INVALID_AUTHORIZATION")
            }
            AuthError::InvalidToken | AuthError::InvalidUserId => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
            }
            AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND"),
            AuthError::UserLoadError => (StatusCode::INTERNAL_SERVER_ERROR, "USER_LOAD_ERROR"),
            AuthError::TokenIssueFailed | AuthError::Hashing(_) => {
                tracing::error!(error = %self, "Authentication internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_ERROR")
            }
        };

        let message = match self {
            AuthError::Hashing(_) => "Authentication failed".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
