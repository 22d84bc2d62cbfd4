//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns the auth read-model query.
//! Uses runtime `sqlx::query_as` (not macros) so the crate builds without
//! a live database.

use sqlx::PgPool;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Find user identity by ID (lightweight subset of the users row)
    pub(crate) async fn find_user(&self, id: i64) -> Result<Option<AuthContext>, AuthError> {
        let user: Option<AuthContext> = sqlx::query_as(
            r#"
            SELECT id AS user_id, email, username, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }

    /// Validate a bearer token and load the user it names.
    pub(crate) async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = crate::jwt::validate_jwt_token(token, &self.config)?;

        let user_id: i64 = claims.sub.parse().map_err(|_| AuthError::InvalidUserId)?;

        self.find_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
