//! Job marketplace API handlers
//!
//! Implements:
//! - POST /v1/jobs - Post a new job
//! - GET /v1/jobs - List available jobs with filters and pagination
//! - GET /v1/jobs/mine - List jobs posted by the caller
//! - GET /v1/jobs/claimed - List jobs claimed by the caller
//! - GET /v1/jobs/{id} - Get a job
//! - DELETE /v1/jobs/{id} - Delete a job (poster only)
//! - POST /v1/jobs/{id}/claim - Claim a job
//! - DELETE /v1/jobs/{id}/claim - Cancel own claim

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use moveshare_auth::AuthUser;
use moveshare_common::{Error, Pagination, Result, ValidatedJson};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::JobsState;
use crate::domain::entities::{ClaimStatus, Job, JobClaim, JobDetails, TruckSize};
use crate::domain::filter::JobFilter;
use crate::service::JobPage;

/// Job response DTO
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub truck_size: TruckSize,
    pub weight: f64,
    pub volume: f64,
    pub payout: Decimal,
    pub is_new: bool,
    pub is_claimed: bool,
    pub is_verified: bool,
    pub is_protected: bool,
    pub is_escrow: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(j: Job) -> Self {
        Self {
            id: j.id,
            user_id: j.user_id,
            title: j.title,
            origin: j.origin,
            destination: j.destination,
            distance: j.distance,
            start_date: j.start_date,
            end_date: j.end_date,
            truck_size: j.truck_size,
            weight: j.weight,
            volume: j.volume,
            payout: j.payout,
            is_new: j.is_new,
            is_claimed: j.is_claimed,
            is_verified: j.is_verified,
            is_protected: j.is_protected,
            is_escrow: j.is_escrow,
            created_at: j.created_at,
        }
    }
}

/// Paginated job list response
#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl From<JobPage> for JobListResponse {
    fn from(page: JobPage) -> Self {
        let total_pages = page.total_pages();
        Self {
            jobs: page.jobs.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page.page,
            page_size: page.page.page_size,
            total_pages,
        }
    }
}

/// Claim response DTO
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}

impl From<JobClaim> for ClaimResponse {
    fn from(c: JobClaim) -> Self {
        Self {
            id: c.id,
            job_id: c.job_id,
            user_id: c.user_id,
            status: c.status,
            created_at: c.created_at,
        }
    }
}

/// Request for posting a job
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub origin: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[validate(range(min = 0.0))]
    pub distance: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub truck_size: TruckSize,
    #[validate(range(min = 0.0))]
    pub weight: f64,
    #[validate(range(min = 0.0))]
    pub volume: f64,
    pub payout: Decimal,
}

impl From<CreateJobRequest> for JobDetails {
    fn from(req: CreateJobRequest) -> Self {
        Self {
            title: req.title,
            origin: req.origin,
            destination: req.destination,
            distance: req.distance,
            start_date: req.start_date,
            end_date: req.end_date,
            truck_size: req.truck_size,
            weight: req.weight,
            volume: req.volume,
            payout: req.payout,
        }
    }
}

/// Page query parameters, read leniently: unparseable values are ignored
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageParams {
    pub fn into_pagination(self) -> Pagination {
        Pagination {
            page: parse_positive(&self.page),
            page_size: parse_positive(&self.page_size),
        }
    }
}

/// Query parameters for listing available jobs.
///
/// Every field is read as text; malformed or non-positive values are dropped
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsParams {
    pub query: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub min_distance: Option<String>,
    pub max_distance: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Comma-separated truck sizes
    pub truck_sizes: Option<String>,
    pub min_payout: Option<String>,
    pub max_payout: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

fn parse_positive<T>(value: &Option<String>) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v > T::default())
}

fn parse_timestamp(value: &Option<String>) -> Option<DateTime<Utc>> {
    value
        .as_deref()
        .and_then(|v| DateTime::parse_from_rfc3339(v.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl ListJobsParams {
    pub fn into_filter(self) -> JobFilter {
        let min_distance = parse_positive::<f64>(&self.min_distance).filter(|v| v.is_finite());
        let max_distance = parse_positive::<f64>(&self.max_distance).filter(|v| v.is_finite());
        let truck_sizes = self
            .truck_sizes
            .as_deref()
            .map(|list| {
                list.split(',')
                    .filter_map(|s| s.parse::<TruckSize>().ok())
                    .collect()
            })
            .unwrap_or_default();

        JobFilter {
            min_distance,
            max_distance,
            start_date: parse_timestamp(&self.start_date),
            end_date: parse_timestamp(&self.end_date),
            truck_sizes,
            min_payout: parse_positive::<Decimal>(&self.min_payout),
            max_payout: parse_positive::<Decimal>(&self.max_payout),
            pagination: Pagination {
                page: parse_positive(&self.page),
                page_size: parse_positive(&self.page_size),
            },
            query: self.query,
            origin: self.origin,
            destination: self.destination,
        }
    }
}

/// POST /v1/jobs - Post a new job
pub async fn create_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>)> {
    let job = state.service.create_job(ctx.user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(job.into())))
}

/// GET /v1/jobs - List available jobs
pub async fn list_available_jobs(
    AuthUser(_ctx): AuthUser,
    State(state): State<JobsState>,
    Query(params): Query<ListJobsParams>,
) -> Result<Json<JobListResponse>> {
    let filter = params.into_filter();
    let page = state.service.get_available_jobs(&filter).await?;
    Ok(Json(page.into()))
}

/// GET /v1/jobs/mine - List jobs posted by the caller
pub async fn list_my_jobs(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Query(params): Query<PageParams>,
) -> Result<Json<JobListResponse>> {
    let page = state
        .service
        .get_user_jobs(ctx.user_id, params.into_pagination())
        .await?;
    Ok(Json(page.into()))
}

/// GET /v1/jobs/claimed - List jobs claimed by the caller
pub async fn list_claimed_jobs(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Query(params): Query<PageParams>,
) -> Result<Json<JobListResponse>> {
    let page = state
        .service
        .get_claimed_jobs(ctx.user_id, params.into_pagination())
        .await?;
    Ok(Json(page.into()))
}

/// GET /v1/jobs/{id} - Get a single job
pub async fn get_job(
    AuthUser(_ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<JobResponse>> {
    let job = state.service.get_job(id).await?;
    Ok(Json(job.into()))
}

/// DELETE /v1/jobs/{id} - Delete a job posted by the caller
pub async fn delete_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let job = state.service.get_job(id).await?;

    // Do not reveal other users' jobs to a delete attempt
    if !job.is_posted_by(ctx.user_id) {
        return Err(Error::NotFound("Job not found".to_string()));
    }

    state.service.delete_job(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/jobs/{id}/claim - Claim a job
pub async fn claim_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ClaimResponse>)> {
    let claim = state.service.claim_job(id, ctx.user_id).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// DELETE /v1/jobs/{id}/claim - Cancel the caller's claim on a job
pub async fn cancel_job_claim(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.service.cancel_job_claim(id, ctx.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
