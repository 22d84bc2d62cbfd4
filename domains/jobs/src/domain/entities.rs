//! Job domain entities for MoveShare
//!
//! A job is a moving task posted by one user and claimable by another.
//! Identity and creation time are always assigned by the store.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::error::JobError;
use crate::domain::state::ClaimState;

/// Maximum length of a job title
pub const MAX_TITLE_LENGTH: usize = 255;

/// Decimal places stored for a payout
pub const PAYOUT_SCALE: u32 = 2;

/// Largest payout the `NUMERIC(12,2)` column holds
pub fn max_payout() -> Decimal {
    Decimal::new(999_999_999_999, PAYOUT_SCALE)
}

/// Truck size needed for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "truck_size", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TruckSize {
    Small,
    Medium,
    Large,
}

impl TruckSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruckSize::Small => "small",
            TruckSize::Medium => "medium",
            TruckSize::Large => "large",
        }
    }
}

impl std::fmt::Display for TruckSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TruckSize {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(TruckSize::Small),
            "medium" => Ok(TruckSize::Medium),
            "large" => Ok(TruckSize::Large),
            other => Err(JobError::Validation(format!("Unknown truck size: {other}"))),
        }
    }
}

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "claim_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    #[default]
    Pending,
}

/// Job entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
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

impl Job {
    /// Current position in the claim state machine
    pub fn claim_state(&self) -> ClaimState {
        ClaimState::from_flag(self.is_claimed)
    }

    /// Check if the job was posted by the given user
    pub fn is_posted_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Caller-supplied fields of a job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
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
}

impl JobDetails {
    /// Validate field ranges and cross-field rules
    pub fn validate(&self) -> Result<(), JobError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(JobError::Validation("Title cannot be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(JobError::Validation(format!(
                "Title cannot exceed {MAX_TITLE_LENGTH} characters"
            )));
        }
        if self.origin.trim().is_empty() {
            return Err(JobError::Validation("Origin cannot be empty".to_string()));
        }
        if self.destination.trim().is_empty() {
            return Err(JobError::Validation(
                "Destination cannot be empty".to_string(),
            ));
        }

        for (name, value) in [
            ("Distance", self.distance),
            ("Weight", self.weight),
            ("Volume", self.volume),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(JobError::Validation(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }

        if self.payout < Decimal::ZERO {
            return Err(JobError::Validation(
                "Payout cannot be negative".to_string(),
            ));
        }
        if self.payout > max_payout() {
            return Err(JobError::Validation(format!(
                "Payout cannot exceed {}",
                max_payout()
            )));
        }

        if self.end_date < self.start_date {
            return Err(JobError::Validation(
                "End date must not be before start date".to_string(),
            ));
        }

        Ok(())
    }
}

/// Flags stamped on a job at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFlags {
    pub is_new: bool,
    pub is_claimed: bool,
    pub is_verified: bool,
    pub is_protected: bool,
    pub is_escrow: bool,
}

impl JobFlags {
    /// Flags every freshly posted job starts with
    pub fn posting_defaults() -> Self {
        Self {
            is_new: true,
            is_claimed: false,
            is_verified: false,
            is_protected: true,
            is_escrow: false,
        }
    }
}

/// A validated job ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub user_id: i64,
    pub details: JobDetails,
    pub flags: JobFlags,
}

impl NewJob {
    /// Create a new job posting with validation and default flags
    ///
    /// The payout is rounded half away from zero to cents, as PostgreSQL
    /// does on insert, before it is checked.
    pub fn new(user_id: i64, mut details: JobDetails) -> Result<Self, JobError> {
        details.payout = details
            .payout
            .round_dp_with_strategy(PAYOUT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        details.validate()?;
        details.title = details.title.trim().to_string();
        details.origin = details.origin.trim().to_string();
        details.destination = details.destination.trim().to_string();

        Ok(Self {
            user_id,
            details,
            flags: JobFlags::posting_defaults(),
        })
    }
}

/// Claim held by a user on a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobClaim {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}
