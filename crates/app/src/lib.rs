//! MoveShare application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use moveshare_auth::{AuthBackend, AuthConfig};
use moveshare_common::Config;
use moveshare_jobs::{JobRepository, JobService, JobsState};
use moveshare_users::{UsersRepositories, UsersState};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Build the auth backend shared by every domain
pub fn auth_backend(config: &Config, pool: PgPool) -> AuthBackend {
    AuthBackend::new(
        pool,
        AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            token_ttl_seconds: config.jwt_ttl_seconds,
        },
    )
}

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    let auth = auth_backend(config, pool.clone());

    let users_state = UsersState {
        repos: UsersRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    let jobs_state = JobsState {
        service: JobService::new(
            Arc::new(JobRepository::new(pool)),
            config.pagination,
        ),
        auth,
    };

    compose(users_state, jobs_state, config.request_timeout_secs)
}

/// Merge domain routers and apply shared middleware
pub fn compose(users_state: UsersState, jobs_state: JobsState, timeout_secs: u64) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { concat!("MoveShare API v", env!("CARGO_PKG_VERSION")) }),
        )
        .merge(moveshare_users::routes().with_state(users_state))
        .merge(moveshare_jobs::routes().with_state(jobs_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(timeout_layer(Duration::from_secs(timeout_secs)))
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
}

/// Abort requests that run past `timeout` with 408 Request Timeout
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
