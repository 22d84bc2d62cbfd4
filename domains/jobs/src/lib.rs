//! Jobs domain: job postings, filtering, claims

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::error::JobError;
pub use domain::filter::{JobFilter, JobPredicate};
pub use domain::state::{ClaimEvent, ClaimState, ClaimStateMachine};

// Re-export repository and service types
pub use repository::{JobRepository, JobStore};
pub use service::{JobPage, JobService};

#[cfg(any(test, feature = "test-support"))]
pub use repository::mock::MockJobStore;

// Re-export API types
pub use api::routes;
pub use api::JobsState;
