//! Sparse job filter and the typed predicates it expands to

use chrono::{DateTime, Utc};
use moveshare_common::Pagination;
use rust_decimal::Decimal;

use crate::domain::entities::{Job, TruckSize};

/// Search criteria for available jobs. `None` and empty values mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// Free text matched against title, origin and destination
    pub query: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    /// Jobs starting at or after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Jobs ending at or before this instant
    pub end_date: Option<DateTime<Utc>>,
    pub truck_sizes: Vec<TruckSize>,
    pub min_payout: Option<Decimal>,
    pub max_payout: Option<Decimal>,
    pub pagination: Pagination,
}

/// One AND-ed condition of an available-jobs query
#[derive(Debug, Clone, PartialEq)]
pub enum JobPredicate {
    /// `is_claimed = false`; always first
    Unclaimed,
    /// Case-insensitive substring of title, origin or destination
    Text(String),
    OriginContains(String),
    DestinationContains(String),
    MinDistance(f64),
    MaxDistance(f64),
    StartsOnOrAfter(DateTime<Utc>),
    EndsOnOrBefore(DateTime<Utc>),
    TruckSizeIn(Vec<TruckSize>),
    MinPayout(Decimal),
    MaxPayout(Decimal),
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl JobFilter {
    /// Expand into predicates, in a stable order, skipping unset fields
    pub fn predicates(&self) -> Vec<JobPredicate> {
        let mut predicates = vec![JobPredicate::Unclaimed];

        if let Some(query) = non_blank(&self.query) {
            predicates.push(JobPredicate::Text(query));
        }
        if let Some(origin) = non_blank(&self.origin) {
            predicates.push(JobPredicate::OriginContains(origin));
        }
        if let Some(destination) = non_blank(&self.destination) {
            predicates.push(JobPredicate::DestinationContains(destination));
        }
        if let Some(min) = self.min_distance {
            predicates.push(JobPredicate::MinDistance(min));
        }
        if let Some(max) = self.max_distance {
            predicates.push(JobPredicate::MaxDistance(max));
        }
        if let Some(start) = self.start_date {
            predicates.push(JobPredicate::StartsOnOrAfter(start));
        }
        if let Some(end) = self.end_date {
            predicates.push(JobPredicate::EndsOnOrBefore(end));
        }
        if !self.truck_sizes.is_empty() {
            let mut sizes: Vec<TruckSize> = Vec::with_capacity(self.truck_sizes.len());
            for size in &self.truck_sizes {
                if !sizes.contains(size) {
                    sizes.push(*size);
                }
            }
            predicates.push(JobPredicate::TruckSizeIn(sizes));
        }
        if let Some(min) = self.min_payout {
            predicates.push(JobPredicate::MinPayout(min));
        }
        if let Some(max) = self.max_payout {
            predicates.push(JobPredicate::MaxPayout(max));
        }

        predicates
    }

    /// Evaluate the filter in memory; agrees with the SQL rendering of `predicates()`
    pub fn matches(&self, job: &Job) -> bool {
        self.predicates().iter().all(|p| p.matches(job))
    }
}

impl JobPredicate {
    pub fn matches(&self, job: &Job) -> bool {
        match self {
            JobPredicate::Unclaimed => !job.is_claimed,
            JobPredicate::Text(term) => {
                contains_ci(&job.title, term)
                    || contains_ci(&job.origin, term)
                    || contains_ci(&job.destination, term)
            }
            JobPredicate::OriginContains(term) => contains_ci(&job.origin, term),
            JobPredicate::DestinationContains(term) => contains_ci(&job.destination, term),
            JobPredicate::MinDistance(min) => job.distance >= *min,
            JobPredicate::MaxDistance(max) => job.distance <= *max,
            JobPredicate::StartsOnOrAfter(start) => job.start_date >= *start,
            JobPredicate::EndsOnOrBefore(end) => job.end_date <= *end,
            JobPredicate::TruckSizeIn(sizes) => sizes.contains(&job.truck_size),
            JobPredicate::MinPayout(min) => job.payout >= *min,
            JobPredicate::MaxPayout(max) => job.payout <= *max,
        }
    }
}
