//! Parameterized WHERE-clause rendering for job filters
//!
//! Predicates are rendered in order, with placeholder numbers allocated as
//! arguments are pushed. The listing and counting queries bind the same
//! argument list; LIMIT/OFFSET placeholders start at `next_placeholder()`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;

use crate::domain::entities::TruckSize;
use crate::domain::filter::JobPredicate;

/// A value bound to a filter placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum FilterArg {
    Text(String),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Decimal(Decimal),
    TruckSize(TruckSize),
}

/// Rendered `WHERE` clause plus its bound arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    conditions: Vec<String>,
    args: Vec<FilterArg>,
}

/// Escape LIKE metacharacters and wrap in `%...%`
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl WhereClause {
    pub fn from_predicates(predicates: &[JobPredicate]) -> Self {
        let mut clause = Self::default();
        for predicate in predicates {
            clause.push(predicate);
        }
        clause
    }

    fn bind(&mut self, arg: FilterArg) -> String {
        self.args.push(arg);
        format!("${}", self.args.len())
    }

    fn push(&mut self, predicate: &JobPredicate) {
        let condition = match predicate {
            JobPredicate::Unclaimed => "is_claimed = FALSE".to_string(),
            JobPredicate::Text(term) => {
                let p = self.bind(FilterArg::Text(like_pattern(term)));
                format!("(title ILIKE {p} OR origin ILIKE {p} OR destination ILIKE {p})")
            }
            JobPredicate::OriginContains(term) => {
                let p = self.bind(FilterArg::Text(like_pattern(term)));
                format!("origin ILIKE {p}")
            }
            JobPredicate::DestinationContains(term) => {
                let p = self.bind(FilterArg::Text(like_pattern(term)));
                format!("destination ILIKE {p}")
            }
            JobPredicate::MinDistance(v) => {
                format!("distance >= {}", self.bind(FilterArg::Float(*v)))
            }
            JobPredicate::MaxDistance(v) => {
                format!("distance <= {}", self.bind(FilterArg::Float(*v)))
            }
            JobPredicate::StartsOnOrAfter(v) => {
                format!("start_date >= {}", self.bind(FilterArg::Timestamp(*v)))
            }
            JobPredicate::EndsOnOrBefore(v) => {
                format!("end_date <= {}", self.bind(FilterArg::Timestamp(*v)))
            }
            JobPredicate::TruckSizeIn(sizes) => {
                if sizes.is_empty() {
                    return;
                }
                let placeholders: Vec<String> = sizes
                    .iter()
                    .map(|size| self.bind(FilterArg::TruckSize(*size)))
                    .collect();
                format!("truck_size IN ({})", placeholders.join(", "))
            }
            JobPredicate::MinPayout(v) => {
                format!("payout >= {}", self.bind(FilterArg::Decimal(*v)))
            }
            JobPredicate::MaxPayout(v) => {
                format!("payout <= {}", self.bind(FilterArg::Decimal(*v)))
            }
        };
        self.conditions.push(condition);
    }

    /// `WHERE a AND b ...`, or an empty string when there are no conditions
    pub fn sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn args(&self) -> &[FilterArg] {
        &self.args
    }

    /// First placeholder number not used by the filter
    pub fn next_placeholder(&self) -> usize {
        self.args.len() + 1
    }

    pub fn bind_query_as<'q, O>(
        &self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for arg in &self.args {
            query = match arg {
                FilterArg::Text(v) => query.bind(v.clone()),
                FilterArg::Float(v) => query.bind(*v),
                FilterArg::Timestamp(v) => query.bind(*v),
                FilterArg::Decimal(v) => query.bind(*v),
                FilterArg::TruckSize(v) => query.bind(*v),
            };
        }
        query
    }

    pub fn bind_query_scalar<'q, O>(
        &self,
        mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        for arg in &self.args {
            query = match arg {
                FilterArg::Text(v) => query.bind(v.clone()),
                FilterArg::Float(v) => query.bind(*v),
                FilterArg::Timestamp(v) => query.bind(*v),
                FilterArg::Decimal(v) => query.bind(*v),
                FilterArg::TruckSize(v) => query.bind(*v),
            };
        }
        query
    }
}
