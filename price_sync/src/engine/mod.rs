//! The job-driven ingestion engine.
//!
//! One run: load a filtered job batch, group it by symbol, fetch each
//! symbol once through the provider (rate-limited), then resolve every job
//! against the fetched series. Each job commits its own outcome
//! immediately, so a crash after job N leaves jobs 1..N-1 terminal and the
//! run resumable. Per-job failures never escape the job boundary; only a
//! lost store connection or an interrupt aborts the run.

pub mod mode;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use diesel::{Connection, SqliteConnection};
use market_feed::{
    models::{
        request::{DateSpan, SeriesRequest},
        series::DailySeries,
    },
    providers::{DailyPriceProvider, ProviderError},
};
use rand::Rng;
use thiserror::Error;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, warn};

use crate::{
    db::StoreError,
    jobs::JobStore,
    models::{ErrorKind, Job, JobOutcome},
    normalize,
    prices::{PriceStore, UpsertOutcome},
    rate_limit::FixedWindowLimiter,
};

pub use mode::{BatchOptions, RunConfig, RunMode};

/// Literal message for a date the provider had no entry for. Kept stable:
/// operators grep for it, and historical rows in the job table carry it.
pub const MARKET_CLOSED_MESSAGE: &str = "No data for trade_date (market closed?)";

#[derive(Debug, Error)]
pub enum EngineError {
    /// An external stop signal ended the run. Committed outcomes stand.
    #[error("run interrupted")]
    Interrupted,

    #[error("failed to load job batch: {0}")]
    LoadBatch(#[source] StoreError),

    /// A status update failed; continuing would silently lose job state.
    #[error("status update failed for job {job_id}: {source}")]
    StatusUpdate { job_id: i32, source: StoreError },

    /// The price store connection is gone; the batch cannot continue.
    #[error("price store connection lost: {0}")]
    ConnectionLost(#[source] StoreError),
}

/// Per-run outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub struct IngestionEngine<'a> {
    provider: &'a dyn DailyPriceProvider,
    job_store: &'a dyn JobStore,
    price_store: &'a dyn PriceStore,
    limiter: FixedWindowLimiter,
    cancel: Arc<AtomicBool>,
}

impl<'a> IngestionEngine<'a> {
    pub fn new(
        provider: &'a dyn DailyPriceProvider,
        job_store: &'a dyn JobStore,
        price_store: &'a dyn PriceStore,
        limiter: FixedWindowLimiter,
    ) -> Self {
        Self {
            provider,
            job_store,
            price_store,
            limiter,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Installs a shared stop flag. When it flips, the engine finishes (or
    /// safely abandons) the job in flight and returns
    /// [`EngineError::Interrupted`].
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn run(
        &mut self,
        conn: &mut SqliteConnection,
        config: &RunConfig,
    ) -> Result<RunSummary, EngineError> {
        let jobs = self
            .job_store
            .load(conn, &config.filter)
            .map_err(EngineError::LoadBatch)?;

        let mut summary = RunSummary {
            loaded: jobs.len(),
            ..Default::default()
        };
        if jobs.is_empty() {
            info!("nothing to do; no jobs match the filter");
            return Ok(summary);
        }
        info!(jobs = jobs.len(), "loaded job batch");

        let groups = group_by_symbol(jobs);
        match &config.batch {
            None => self.run_grouped(conn, config, groups, &mut summary).await?,
            Some(options) => self.run_batched(conn, groups, options, &mut summary).await?,
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "run complete"
        );
        Ok(summary)
    }

    /// One provider call per symbol; no network retry. A failed fetch
    /// fails every job of that symbol once and the run moves on.
    async fn run_grouped(
        &mut self,
        conn: &mut SqliteConnection,
        config: &RunConfig,
        groups: Vec<(String, Vec<Job>)>,
        summary: &mut RunSummary,
    ) -> Result<(), EngineError> {
        for (symbol, jobs) in groups {
            self.check_cancelled()?;
            self.limiter.acquire().await;

            let request = SeriesRequest {
                symbol: symbol.clone(),
                span: span_of(&jobs),
                output_size: config.output_size,
            };
            match self.provider.fetch_daily(&request).await {
                Ok(series) => {
                    for job in &jobs {
                        self.check_cancelled()?;
                        if self.process_job(conn, job, &series)? {
                            summary.succeeded += 1;
                        } else {
                            summary.failed += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "fetch failed; failing all jobs for symbol");
                    let outcome = fetch_failure_outcome(&e);
                    for job in &jobs {
                        self.mark(conn, job, outcome.clone())?;
                        summary.failed += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// Multi-symbol batches with bounded linear-backoff retry. Exhausting
    /// the retries fails the whole batch with a `batch-error:` message and
    /// the run proceeds to the next batch.
    ///
    /// The limiter meters batch calls, not the per-symbol requests an
    /// adapter may fan out underneath; the randomized pause between
    /// batches is the throttle for those.
    async fn run_batched(
        &mut self,
        conn: &mut SqliteConnection,
        groups: Vec<(String, Vec<Job>)>,
        options: &BatchOptions,
        summary: &mut RunSummary,
    ) -> Result<(), EngineError> {
        let batch_count = groups.len().div_ceil(options.batch_size.max(1));

        for (index, batch) in groups.chunks(options.batch_size.max(1)).enumerate() {
            self.check_cancelled()?;
            self.limiter.acquire().await;

            let symbols: Vec<String> = batch.iter().map(|(s, _)| s.clone()).collect();
            let span = batch
                .iter()
                .map(|(_, jobs)| span_of(jobs))
                .reduce(|a, b| DateSpan::new(a.start.min(b.start), a.end.max(b.end)))
                .expect("non-empty batch");

            let mut fetched = None;
            for attempt in 1..=options.max_retries.max(1) {
                self.check_cancelled()?;
                info!(
                    batch = index + 1,
                    of = batch_count,
                    symbols = symbols.len(),
                    attempt,
                    "fetching batch"
                );
                match self.provider.fetch_daily_batch(&symbols, span).await {
                    Ok(map) => {
                        fetched = Some(map);
                        break;
                    }
                    Err(e) => {
                        warn!(attempt, error = %e, "batch fetch failed");
                        if attempt == options.max_retries.max(1) {
                            let outcome = JobOutcome::failed(
                                error_kind_of(&e),
                                format!("batch-error: {e}"),
                            );
                            for (_, jobs) in batch {
                                for job in jobs {
                                    self.mark(conn, job, outcome.clone())?;
                                    summary.failed += 1;
                                }
                            }
                        } else {
                            sleep(options.base_delay * attempt).await;
                        }
                    }
                }
            }

            if let Some(map) = fetched {
                for (symbol, jobs) in batch {
                    match map.get(symbol) {
                        Some(series) => {
                            for job in jobs {
                                self.check_cancelled()?;
                                if self.process_job(conn, job, series)? {
                                    summary.succeeded += 1;
                                } else {
                                    summary.failed += 1;
                                }
                            }
                        }
                        None => {
                            let outcome = JobOutcome::failed(
                                ErrorKind::NoData,
                                "symbol not in downloaded data",
                            );
                            for job in jobs {
                                self.mark(conn, job, outcome.clone())?;
                                summary.failed += 1;
                            }
                        }
                    }
                }
            }

            // Politeness pause so the vendor doesn't throttle back-to-back
            // batches.
            if index + 1 < batch_count {
                let pause_secs = {
                    let mut rng = rand::thread_rng();
                    rng.gen_range(options.min_pause.as_secs_f64()..=options.max_pause.as_secs_f64())
                };
                debug!(pause_secs, "pausing between batches");
                sleep(Duration::from_secs_f64(pause_secs)).await;
            }
        }
        Ok(())
    }

    /// Resolves one job against the symbol's fetched series. Returns
    /// whether the job succeeded; per-job failures are recorded, not
    /// propagated.
    fn process_job(
        &self,
        conn: &mut SqliteConnection,
        job: &Job,
        series: &DailySeries,
    ) -> Result<bool, EngineError> {
        let Some(raw) = series.get(job.trade_date) else {
            self.mark(
                conn,
                job,
                JobOutcome::failed(ErrorKind::NoData, MARKET_CLOSED_MESSAGE),
            )?;
            return Ok(false);
        };

        let record = match normalize::normalize(&job.symbol, job.trade_date, raw) {
            Ok(record) => record,
            Err(e) => {
                self.mark(conn, job, JobOutcome::failed(ErrorKind::Validation, e.to_string()))?;
                return Ok(false);
            }
        };

        // Upsert and SUCCESS mark commit together; on failure the
        // transaction rolls back and the FAILED mark commits separately.
        let result = conn.transaction::<UpsertOutcome, StoreError, _>(|tx| {
            let outcome = self.price_store.upsert(tx, &record)?;
            self.job_store.mark(tx, job.job_id, &JobOutcome::Success)?;
            Ok(outcome)
        });

        match result {
            Ok(UpsertOutcome::Inserted) => {
                info!(symbol = %job.symbol, date = %job.trade_date, "inserted");
                Ok(true)
            }
            Ok(UpsertOutcome::AlreadyExisted) => {
                debug!(symbol = %job.symbol, date = %job.trade_date, "row already present; skipped");
                Ok(true)
            }
            Err(e) if e.is_connection_fatal() => Err(EngineError::ConnectionLost(e)),
            Err(e) => {
                self.mark(
                    conn,
                    job,
                    JobOutcome::failed(ErrorKind::Persistence, format!("Insert error: {e}")),
                )?;
                Ok(false)
            }
        }
    }

    fn mark(
        &self,
        conn: &mut SqliteConnection,
        job: &Job,
        outcome: JobOutcome,
    ) -> Result<(), EngineError> {
        if let JobOutcome::Failed { ref message, .. } = outcome {
            warn!(symbol = %job.symbol, date = %job.trade_date, %message, "job failed");
        }
        self.job_store
            .mark(conn, job.job_id, &outcome)
            .map_err(|source| EngineError::StatusUpdate {
                job_id: job.job_id,
                source,
            })
    }

    fn check_cancelled(&self) -> Result<(), EngineError> {
        if self.cancel.load(Ordering::SeqCst) {
            Err(EngineError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Groups jobs by uppercased symbol, ascending, with dates ascending
/// within each symbol. One group means one provider fetch for the run.
fn group_by_symbol(jobs: Vec<Job>) -> Vec<(String, Vec<Job>)> {
    let mut groups: BTreeMap<String, Vec<Job>> = BTreeMap::new();
    for mut job in jobs {
        job.symbol = job.symbol.to_uppercase();
        groups.entry(job.symbol.clone()).or_default().push(job);
    }
    for jobs in groups.values_mut() {
        jobs.sort_by_key(|j| j.trade_date);
    }
    groups.into_iter().collect()
}

fn span_of(jobs: &[Job]) -> DateSpan {
    let start = jobs.iter().map(|j| j.trade_date).min().expect("non-empty group");
    let end = jobs.iter().map(|j| j.trade_date).max().expect("non-empty group");
    DateSpan::new(start, end)
}

fn error_kind_of(error: &ProviderError) -> ErrorKind {
    match error {
        ProviderError::Transport(_) => ErrorKind::Transport,
        ProviderError::Api(_) => ErrorKind::Api,
        ProviderError::RateLimited(_) => ErrorKind::RateLimited,
        ProviderError::NoData(_) => ErrorKind::NoData,
    }
}

fn fetch_failure_outcome(error: &ProviderError) -> JobOutcome {
    let message = match error {
        ProviderError::NoData(symbol) => format!("No data returned from provider for {symbol}"),
        other => format!("API error: {other}"),
    };
    JobOutcome::failed(error_kind_of(error), message)
}
