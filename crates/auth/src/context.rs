//! Authorization context for authenticated users

use chrono::{DateTime, Utc};

/// Represents an authenticated user context
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
