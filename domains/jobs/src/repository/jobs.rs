//! PostgreSQL job store

use moveshare_common::{Page, RepositoryError};
use sqlx::PgPool;

use super::query::WhereClause;
use super::transactions::{cancel_job_claim_tx, claim_job_tx};
use super::{JobListing, JobStore};
use crate::domain::entities::{Job, JobClaim, NewJob};
use crate::domain::filter::JobFilter;

pub(crate) const JOB_COLUMNS: &str = "id, user_id, title, origin, destination, distance, \
    start_date, end_date, truck_size, weight, volume, payout, \
    is_new, is_claimed, is_verified, is_protected, is_escrow, created_at";

/// `JOB_COLUMNS` qualified with the `j` alias, for joins against `job_claims`
const JOB_COLUMNS_J: &str = "j.id, j.user_id, j.title, j.origin, j.destination, j.distance, \
    j.start_date, j.end_date, j.truck_size, j.weight, j.volume, j.payout, \
    j.is_new, j.is_claimed, j.is_verified, j.is_protected, j.is_escrow, j.created_at";

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl JobStore for JobRepository {
    async fn create_job(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let query = format!(
            "INSERT INTO jobs (user_id, title, origin, destination, distance, start_date, \
                               end_date, truck_size, weight, volume, payout, is_new, \
                               is_claimed, is_verified, is_protected, is_escrow) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {JOB_COLUMNS}"
        );
        let d = &job.details;
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(job.user_id)
            .bind(&d.title)
            .bind(&d.origin)
            .bind(&d.destination)
            .bind(d.distance)
            .bind(d.start_date)
            .bind(d.end_date)
            .bind(d.truck_size)
            .bind(d.weight)
            .bind(d.volume)
            .bind(d.payout)
            .bind(job.flags.is_new)
            .bind(job.flags.is_claimed)
            .bind(job.flags.is_verified)
            .bind(job.flags.is_protected)
            .bind(job.flags.is_escrow)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_insert)?;
        Ok(row)
    }

    async fn get_job_by_id(&self, id: i64) -> Result<Option<Job>, RepositoryError> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_jobs_by_user_id(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<JobListing, RepositoryError> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let jobs = sqlx::query_as::<_, Job>(&query)
            .bind(user_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((jobs, total))
    }

    async fn get_claimed_jobs_by_user_id(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<JobListing, RepositoryError> {
        let query = format!(
            "SELECT {JOB_COLUMNS_J} FROM jobs j \
             JOIN job_claims c ON c.job_id = j.id \
             WHERE c.user_id = $1 \
             ORDER BY c.created_at DESC, c.id DESC LIMIT $2 OFFSET $3"
        );
        let jobs = sqlx::query_as::<_, Job>(&query)
            .bind(user_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM job_claims WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((jobs, total))
    }

    async fn get_available_jobs(
        &self,
        filter: &JobFilter,
        page: Page,
    ) -> Result<JobListing, RepositoryError> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let limit = clause.next_placeholder();
        let offset = limit + 1;

        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs {} \
             ORDER BY created_at DESC, id DESC LIMIT ${limit} OFFSET ${offset}",
            clause.sql()
        );
        let jobs = clause
            .bind_query_as(sqlx::query_as::<_, Job>(&query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM jobs {}", clause.sql());
        let total = clause
            .bind_query_scalar(sqlx::query_scalar::<_, i64>(&count_query))
            .fetch_one(&self.pool)
            .await?;

        Ok((jobs, total))
    }

    async fn delete_job(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn claim_job(&self, job_id: i64, user_id: i64) -> Result<JobClaim, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let claim = claim_job_tx(&mut tx, job_id, user_id).await?;
        tx.commit().await?;
        Ok(claim)
    }

    async fn cancel_job_claim(&self, job_id: i64, user_id: i64) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        cancel_job_claim_tx(&mut tx, job_id, user_id).await?;
        tx.commit().await?;
        Ok(())
    }
}
