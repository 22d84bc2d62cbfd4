//! Job service: posting defaults, pagination resolution and error translation
//! on top of a `JobStore`

use std::sync::Arc;

use moveshare_common::{Page, Pagination, PaginationConfig};

use crate::domain::entities::{Job, JobClaim, JobDetails, NewJob};
use crate::domain::error::JobError;
use crate::domain::filter::JobFilter;
use crate::repository::JobStore;

/// One page of jobs with the resolved page request
#[derive(Debug, Clone, PartialEq)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total: i64,
    pub page: Page,
}

impl JobPage {
    pub fn total_pages(&self) -> i64 {
        self.page.total_pages(self.total)
    }
}

#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn JobStore>,
    pagination: PaginationConfig,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }

    /// Post a new job on behalf of `user_id`
    pub async fn create_job(&self, user_id: i64, details: JobDetails) -> Result<Job, JobError> {
        let new_job = NewJob::new(user_id, details)?;
        let job = self
            .store
            .create_job(&new_job)
            .await
            .map_err(|e| JobError::from_store(e, JobError::JobNotFound))?;

        tracing::info!(job_id = job.id, user_id, "Job created");
        Ok(job)
    }

    pub async fn get_job(&self, id: i64) -> Result<Job, JobError> {
        self.store
            .get_job_by_id(id)
            .await
            .map_err(|e| JobError::from_store(e, JobError::JobNotFound))?
            .ok_or(JobError::JobNotFound)
    }

    /// Jobs posted by a user
    pub async fn get_user_jobs(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<JobPage, JobError> {
        let page = pagination.resolve(&self.pagination);
        let (jobs, total) = self
            .store
            .get_jobs_by_user_id(user_id, page)
            .await
            .map_err(|e| JobError::from_store(e, JobError::JobNotFound))?;
        Ok(JobPage { jobs, total, page })
    }

    /// Jobs the user currently holds a claim on
    pub async fn get_claimed_jobs(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<JobPage, JobError> {
        let page = pagination.resolve(&self.pagination);
        let (jobs, total) = self
            .store
            .get_claimed_jobs_by_user_id(user_id, page)
            .await
            .map_err(|e| JobError::from_store(e, JobError::JobNotFound))?;
        Ok(JobPage { jobs, total, page })
    }

    /// Unclaimed jobs matching the filter
    pub async fn get_available_jobs(&self, filter: &JobFilter) -> Result<JobPage, JobError> {
        let page = filter.pagination.resolve(&self.pagination);
        let (jobs, total) = self
            .store
            .get_available_jobs(filter, page)
            .await
            .map_err(|e| JobError::from_store(e, JobError::JobNotFound))?;
        Ok(JobPage { jobs, total, page })
    }

    pub async fn delete_job(&self, id: i64) -> Result<(), JobError> {
        self.store
            .delete_job(id)
            .await
            .map_err(|e| JobError::from_store(e, JobError::JobNotFound))?;

        tracing::info!(job_id = id, "Job deleted");
        Ok(())
    }

    pub async fn claim_job(&self, job_id: i64, user_id: i64) -> Result<JobClaim, JobError> {
        let claim = self
            .store
            .claim_job(job_id, user_id)
            .await
            .map_err(|e| JobError::from_store(e, JobError::JobNotFound))?;

        tracing::info!(job_id, user_id, claim_id = claim.id, "Job claimed");
        Ok(claim)
    }

    pub async fn cancel_job_claim(&self, job_id: i64, user_id: i64) -> Result<(), JobError> {
        self.store
            .cancel_job_claim(job_id, user_id)
            .await
            .map_err(|e| JobError::from_store(e, JobError::ClaimNotFound))?;

        tracing::info!(job_id, user_id, "Job claim cancelled");
        Ok(())
    }
}
