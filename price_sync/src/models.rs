//! Row models and status/error vocabularies for the job and price tables.

use chrono::NaiveDate;
use diesel::prelude::*;

/// Terminal-or-pending lifecycle of a job. PENDING jobs are selected by a
/// run; every selected job ends the run as SUCCESS or FAILED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Success => "SUCCESS",
            JobStatus::Failed => "FAILED",
        }
    }
}

/// Machine-readable failure tag stored next to the human-readable message.
///
/// Recovery runs filter on this tag instead of pattern-matching message
/// text, so message wording can change without breaking recovery filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout, or non-2xx status.
    Transport,
    /// Vendor-reported error inside a successful response.
    Api,
    /// Vendor rate-limit notice.
    RateLimited,
    /// The fetched series had no entry for the trade date.
    NoData,
    /// The entry was present but malformed.
    Validation,
    /// The price upsert itself failed.
    Persistence,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Api => "api",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::NoData => "no_data",
            ErrorKind::Validation => "validation",
            ErrorKind::Persistence => "persistence",
        }
    }
}

/// The job projection the engine works with.
///
/// Status columns stay in the table; the engine only ever transitions them
/// through [`JobStore::mark`](crate::jobs::JobStore::mark).
#[derive(Debug, Clone, Queryable, PartialEq, Eq)]
pub struct Job {
    pub job_id: i32,
    pub symbol: String,
    pub trade_date: NaiveDate,
}

/// Terminal outcome recorded for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Success,
    Failed { kind: ErrorKind, message: String },
}

impl JobOutcome {
    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        JobOutcome::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> JobStatus {
        match self {
            JobOutcome::Success => JobStatus::Success,
            JobOutcome::Failed { .. } => JobStatus::Failed,
        }
    }

    pub fn kind_tag(&self) -> Option<&'static str> {
        match self {
            JobOutcome::Success => None,
            JobOutcome::Failed { kind, .. } => Some(kind.as_str()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            JobOutcome::Success => None,
            JobOutcome::Failed { message, .. } => Some(message),
        }
    }
}

/// Canonical daily bar, validated and rounded, ready for persistence.
///
/// Exactly one row may exist per `(symbol, trade_date)`; duplicate writes
/// are skipped, never overwritten.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = crate::schema::daily_prices)]
pub struct PriceRecord {
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: i64,
    pub dividend_amount: f64,
    pub split_coefficient: f64,
}
