//! Repository implementations for Jobs domain

pub mod jobs;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod query;
pub mod transactions;

use moveshare_common::{Page, RepositoryError};

use crate::domain::entities::{Job, JobClaim, NewJob};
use crate::domain::filter::JobFilter;

pub use jobs::JobRepository;

/// Jobs on one page plus the total number of matching rows
pub type JobListing = (Vec<Job>, i64);

/// Persistence operations for jobs and claims
///
/// Listings are ordered newest first. Missing rows on single-row lookups are
/// `Ok(None)`; on deletes and claim transitions they are
/// `RepositoryError::NotFound`. A claim on an already claimed job is
/// `RepositoryError::AlreadyExists`.
#[async_trait::async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a job and return the stored row with its assigned id
    async fn create_job(&self, job: &NewJob) -> Result<Job, RepositoryError>;

    async fn get_job_by_id(&self, id: i64) -> Result<Option<Job>, RepositoryError>;

    /// Jobs posted by a user
    async fn get_jobs_by_user_id(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<JobListing, RepositoryError>;

    /// Jobs the user currently holds a claim on, most recent claim first
    async fn get_claimed_jobs_by_user_id(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<JobListing, RepositoryError>;

    /// Unclaimed jobs matching the filter; the total ignores pagination
    async fn get_available_jobs(
        &self,
        filter: &JobFilter,
        page: Page,
    ) -> Result<JobListing, RepositoryError>;

    /// Delete a job and, through the cascade, its claim
    async fn delete_job(&self, id: i64) -> Result<(), RepositoryError>;

    /// Atomically move an unclaimed job to claimed and record the claim
    async fn claim_job(&self, job_id: i64, user_id: i64) -> Result<JobClaim, RepositoryError>;

    /// Atomically drop the user's claim and mark the job unclaimed
    async fn cancel_job_claim(&self, job_id: i64, user_id: i64) -> Result<(), RepositoryError>;
}
