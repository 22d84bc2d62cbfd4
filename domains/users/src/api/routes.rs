//! Route definitions for Users domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::accounts;
use super::middleware::UsersState;

/// Create all Users domain API routes
pub fn routes() -> Router<UsersState> {
    Router::new()
        .route("/sign-up", post(accounts::sign_up))
        .route("/login", post(accounts::login))
        .route("/v1/account", get(accounts::get_profile))
}
