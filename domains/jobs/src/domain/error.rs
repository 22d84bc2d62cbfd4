//! Typed error kinds for job operations

use moveshare_common::{Error, RepositoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Job not found")]
    JobNotFound,

    #[error("Job claim not found")]
    ClaimNotFound,

    #[error("Job is already claimed")]
    AlreadyClaimed,

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),
}

impl JobError {
    /// Translate a store error, naming what a `NotFound` sentinel means for this call
    pub(crate) fn from_store(err: RepositoryError, not_found: JobError) -> Self {
        match err {
            RepositoryError::NotFound => not_found,
            RepositoryError::AlreadyExists => JobError::AlreadyClaimed,
            RepositoryError::Connection(e) => JobError::Persistence(e),
            RepositoryError::InvalidData(msg) => JobError::Validation(msg),
        }
    }
}

impl From<JobError> for Error {
    fn from(err: JobError) -> Self {
        match err {
            JobError::JobNotFound => Error::NotFound("Job not found".to_string()),
            JobError::ClaimNotFound => Error::NotFound("Job claim not found".to_string()),
            JobError::AlreadyClaimed => Error::Conflict("Job is already claimed".to_string()),
            JobError::Persistence(e) => Error::Database(e),
            JobError::Validation(msg) => Error::Validation(msg),
        }
    }
}
