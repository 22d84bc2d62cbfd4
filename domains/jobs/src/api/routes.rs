//! Route definitions for Jobs domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::jobs;
use super::middleware::JobsState;

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .route("/v1/jobs", get(jobs::list_available_jobs).post(jobs::create_job))
        .route("/v1/jobs/mine", get(jobs::list_my_jobs))
        .route("/v1/jobs/claimed", get(jobs::list_claimed_jobs))
        .route("/v1/jobs/{id}", get(jobs::get_job).delete(jobs::delete_job))
        .route(
            "/v1/jobs/{id}/claim",
            post(jobs::claim_job).delete(jobs::cancel_job_claim),
        )
}
