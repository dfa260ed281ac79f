//! Run-mode configuration.
//!
//! The original pipelines differed only in job filter, provider window, and
//! fetch strategy; [`RunMode`] captures those differences so a single
//! engine serves daily runs, backfills, recovery passes, and batched runs.

use chrono::NaiveDate;
use market_feed::models::request::OutputSize;
use tokio::time::Duration;

use crate::{
    jobs::JobFilter,
    models::{ErrorKind, JobStatus},
};

/// Tuning for the batched fetch strategy.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Symbols per multi-symbol request.
    pub batch_size: usize,
    /// Fetch attempts per batch before its jobs are failed wholesale.
    pub max_retries: u32,
    /// Backoff grows linearly: `attempt * base_delay`.
    pub base_delay: Duration,
    /// Bounds of the randomized politeness pause between batches.
    pub min_pause: Duration,
    pub max_pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 200,
            max_retries: 3,
            base_delay: Duration::from_secs(2),
            min_pause: Duration::from_secs(2),
            max_pause: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RunMode {
    /// Incremental run: PENDING jobs for one trade date, compact window.
    Daily { trade_date: NaiveDate },
    /// Like `Daily` but requests the provider's full history, for dates
    /// older than the compact window covers.
    Backfill { trade_date: NaiveDate },
    /// Re-attempts FAILED jobs whose error tags are recoverable
    /// (market-closed ambiguity, transport timeouts) via the fallback
    /// provider.
    Recovery,
    /// Batched multi-symbol fetching with bounded retry and politeness
    /// pauses.
    Batch {
        trade_date: NaiveDate,
        options: BatchOptions,
    },
}

/// Everything the engine needs to know about one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub filter: JobFilter,
    pub output_size: OutputSize,
    pub batch: Option<BatchOptions>,
}

impl RunMode {
    pub fn config(self) -> RunConfig {
        match self {
            RunMode::Daily { trade_date } => RunConfig {
                filter: JobFilter {
                    status: JobStatus::Pending,
                    trade_date: Some(trade_date),
                    error_kinds: Vec::new(),
                },
                output_size: OutputSize::Compact,
                batch: None,
            },
            RunMode::Backfill { trade_date } => RunConfig {
                filter: JobFilter {
                    status: JobStatus::Pending,
                    trade_date: Some(trade_date),
                    error_kinds: Vec::new(),
                },
                output_size: OutputSize::Full,
                batch: None,
            },
            RunMode::Recovery => RunConfig {
                filter: JobFilter {
                    status: JobStatus::Failed,
                    trade_date: None,
                    error_kinds: vec![ErrorKind::NoData, ErrorKind::Transport],
                },
                output_size: OutputSize::Compact,
                batch: None,
            },
            RunMode::Batch {
                trade_date,
                options,
            } => RunConfig {
                filter: JobFilter {
                    status: JobStatus::Pending,
                    trade_date: Some(trade_date),
                    error_kinds: Vec::new(),
                },
                output_size: OutputSize::Compact,
                batch: Some(options),
            },
        }
    }
}
