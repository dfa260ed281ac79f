//! Job queue access.
//!
//! Jobs are created by an upstream generation process and owned by this
//! store; the engine only ever reads a filtered batch and records terminal
//! outcomes. Portable surface here, SQLite implementation in `repo.rs`.

pub mod repo;

use chrono::NaiveDate;
use diesel::SqliteConnection;

use crate::{
    db::StoreError,
    models::{ErrorKind, Job, JobOutcome, JobStatus},
};

pub use repo::SqliteJobStore;

/// Predicate over the job table.
///
/// `error_kinds` is only meaningful for FAILED selections: a recovery run
/// names the failure tags it considers recoverable. Empty means "any".
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub status: JobStatus,
    pub trade_date: Option<NaiveDate>,
    pub error_kinds: Vec<ErrorKind>,
}

pub trait JobStore: Send + Sync {
    /// Loads the matching jobs ordered by symbol, then trade date, so runs
    /// and their logs are deterministic.
    fn load(&self, conn: &mut SqliteConnection, filter: &JobFilter)
    -> Result<Vec<Job>, StoreError>;

    /// Records a job's terminal status, message, and error tag, stamping
    /// the attempt time. A failure of this call is fatal to the run: job
    /// state must never be lost silently.
    fn mark(
        &self,
        conn: &mut SqliteConnection,
        job_id: i32,
        outcome: &JobOutcome,
    ) -> Result<(), StoreError>;
}
