//! In-memory job store for tests
//!
//! Mirrors the PostgreSQL store's semantics: store-assigned ids, newest-first
//! listings, cascade of claims on delete, and claim transitions that are
//! atomic under a single lock.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use moveshare_common::{Page, RepositoryError, StateError};
use tokio::sync::Mutex;

use super::{JobListing, JobStore};
use crate::domain::entities::{ClaimStatus, Job, JobClaim, NewJob};
use crate::domain::filter::JobFilter;
use crate::domain::state::{ClaimEvent, ClaimStateMachine};

#[derive(Debug, Default)]
struct MockState {
    next_job_id: i64,
    next_claim_id: i64,
    jobs: BTreeMap<i64, Job>,
    claims: Vec<JobClaim>,
}

/// Mock job store with a switch to simulate write failures
#[derive(Debug, Clone, Default)]
pub struct MockJobStore {
    state: Arc<Mutex<MockState>>,
    fail_writes: Arc<AtomicBool>,
}

fn unavailable() -> RepositoryError {
    RepositoryError::Connection(sqlx::Error::PoolTimedOut)
}

/// Newest first, ties broken by id, then cut to the requested page
fn paginate(mut jobs: Vec<Job>, page: Page) -> JobListing {
    jobs.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    let total = jobs.len() as i64;
    let jobs = jobs
        .into_iter()
        .skip(page.offset().max(0) as usize)
        .take(page.limit().max(0) as usize)
        .collect();
    (jobs, total)
}

impl MockJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with a connection error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }

    /// All claim rows referencing a job
    pub async fn claims_for(&self, job_id: i64) -> Vec<JobClaim> {
        let state = self.state.lock().await;
        state
            .claims
            .iter()
            .filter(|c| c.job_id == job_id)
            .cloned()
            .collect()
    }

    /// True when every job's `is_claimed` flag matches exactly one claim row
    /// (or none, when unclaimed) and no claim points at a missing job
    pub async fn claim_flags_consistent(&self) -> bool {
        let state = self.state.lock().await;
        let jobs_ok = state.jobs.values().all(|job| {
            let count = state.claims.iter().filter(|c| c.job_id == job.id).count();
            if job.is_claimed {
                count == 1
            } else {
                count == 0
            }
        });
        let claims_ok = state
            .claims
            .iter()
            .all(|c| state.jobs.contains_key(&c.job_id));
        jobs_ok && claims_ok
    }

    /// Number of stored jobs
    pub async fn job_count(&self) -> usize {
        self.state.lock().await.jobs.len()
    }
}

#[async_trait::async_trait]
impl JobStore for MockJobStore {
    async fn create_job(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        state.next_job_id += 1;
        let d = &job.details;
        let stored = Job {
            id: state.next_job_id,
            user_id: job.user_id,
            title: d.title.clone(),
            origin: d.origin.clone(),
            destination: d.destination.clone(),
            distance: d.distance,
            start_date: d.start_date,
            end_date: d.end_date,
            truck_size: d.truck_size,
            weight: d.weight,
            volume: d.volume,
            payout: d.payout,
            is_new: job.flags.is_new,
            is_claimed: job.flags.is_claimed,
            is_verified: job.flags.is_verified,
            is_protected: job.flags.is_protected,
            is_escrow: job.flags.is_escrow,
            created_at: Utc::now(),
        };
        state.jobs.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_job_by_id(&self, id: i64) -> Result<Option<Job>, RepositoryError> {
        Ok(self.state.lock().await.jobs.get(&id).cloned())
    }

    async fn get_jobs_by_user_id(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<JobListing, RepositoryError> {
        let state = self.state.lock().await;
        let jobs = state
            .jobs
            .values()
            .filter(|j| j.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(jobs, page))
    }

    async fn get_claimed_jobs_by_user_id(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<JobListing, RepositoryError> {
        let state = self.state.lock().await;
        let mut claims: Vec<&JobClaim> =
            state.claims.iter().filter(|c| c.user_id == user_id).collect();
        claims.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let total = claims.len() as i64;
        let jobs = claims
            .into_iter()
            .filter_map(|c| state.jobs.get(&c.job_id).cloned())
            .skip(page.offset().max(0) as usize)
            .take(page.limit().max(0) as usize)
            .collect();
        Ok((jobs, total))
    }

    async fn get_available_jobs(
        &self,
        filter: &JobFilter,
        page: Page,
    ) -> Result<JobListing, RepositoryError> {
        let state = self.state.lock().await;
        let jobs = state
            .jobs
            .values()
            .filter(|j| filter.matches(j))
            .cloned()
            .collect();
        Ok(paginate(jobs, page))
    }

    async fn delete_job(&self, id: i64) -> Result<(), RepositoryError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        if state.jobs.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        state.claims.retain(|c| c.job_id != id);
        Ok(())
    }

    async fn claim_job(&self, job_id: i64, user_id: i64) -> Result<JobClaim, RepositoryError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        let current = state
            .jobs
            .get(&job_id)
            .map(Job::claim_state)
            .ok_or(RepositoryError::NotFound)?;

        ClaimStateMachine::transition(current, ClaimEvent::Claim).map_err(|e| match e {
            StateError::GuardFailed(_) => RepositoryError::AlreadyExists,
            other => RepositoryError::InvalidData(other.to_string()),
        })?;

        state.next_claim_id += 1;
        let claim = JobClaim {
            id: state.next_claim_id,
            job_id,
            user_id,
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
        };
        state.claims.push(claim.clone());
        if let Some(job) = state.jobs.get_mut(&job_id) {
            job.is_claimed = true;
        }
        Ok(claim)
    }

    async fn cancel_job_claim(&self, job_id: i64, user_id: i64) -> Result<(), RepositoryError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        let position = state
            .claims
            .iter()
            .position(|c| c.job_id == job_id && c.user_id == user_id)
            .ok_or(RepositoryError::NotFound)?;

        let job = state
            .jobs
            .get_mut(&job_id)
            .ok_or(RepositoryError::NotFound)?;
        let next = ClaimStateMachine::transition(job.claim_state(), ClaimEvent::Cancel)
            .map_err(|_| RepositoryError::NotFound)?;
        job.is_claimed = next.is_claimed();

        state.claims.remove(position);
        Ok(())
    }
}
