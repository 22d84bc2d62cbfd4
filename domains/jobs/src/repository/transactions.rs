//! Transaction helpers for the claim state machine
//!
//! Both helpers run inside a caller-owned transaction. If the caller drops the
//! transaction without committing, every write made here is rolled back.

use moveshare_common::RepositoryError;
use sqlx::{Postgres, Transaction};

use crate::domain::entities::{ClaimStatus, JobClaim};

const CLAIM_COLUMNS: &str = "id, job_id, user_id, status, created_at";

/// Check whether a job row exists within a transaction
pub async fn job_exists_tx(
    tx: &mut Transaction<'_, Postgres>,
    job_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
        .bind(job_id)
        .fetch_one(&mut **tx)
        .await
}

/// Claim a job within a transaction.
///
/// The conditional update is a compare-and-swap on `is_claimed`: it takes the
/// row lock, so a racing claimer blocks until this transaction ends and then
/// re-evaluates `is_claimed = FALSE`, matching zero rows.
pub async fn claim_job_tx(
    tx: &mut Transaction<'_, Postgres>,
    job_id: i64,
    user_id: i64,
) -> Result<JobClaim, RepositoryError> {
    let updated =
        sqlx::query("UPDATE jobs SET is_claimed = TRUE WHERE id = $1 AND is_claimed = FALSE")
            .bind(job_id)
            .execute(&mut **tx)
            .await?;

    if updated.rows_affected() == 0 {
        return if job_exists_tx(tx, job_id).await? {
            Err(RepositoryError::AlreadyExists)
        } else {
            Err(RepositoryError::NotFound)
        };
    }

    let query = format!(
        "INSERT INTO job_claims (job_id, user_id, status) VALUES ($1, $2, $3) \
         RETURNING {CLAIM_COLUMNS}"
    );
    let claim = sqlx::query_as::<_, JobClaim>(&query)
        .bind(job_id)
        .bind(user_id)
        .bind(ClaimStatus::Pending)
        .fetch_one(&mut **tx)
        .await
        .map_err(RepositoryError::from_insert)?;

    Ok(claim)
}

/// Cancel a user's claim on a job within a transaction.
///
/// Only the claiming user's row is removed; the job flag is left untouched
/// when there is nothing to remove.
pub async fn cancel_job_claim_tx(
    tx: &mut Transaction<'_, Postgres>,
    job_id: i64,
    user_id: i64,
) -> Result<(), RepositoryError> {
    let deleted = sqlx::query("DELETE FROM job_claims WHERE job_id = $1 AND user_id = $2")
        .bind(job_id)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    sqlx::query("UPDATE jobs SET is_claimed = FALSE WHERE id = $1")
        .bind(job_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
