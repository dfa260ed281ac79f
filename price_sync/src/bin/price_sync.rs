//! price-sync — job-driven daily price ingestion CLI.
//!
//! Pulls per-symbol/per-date jobs from the database and resolves them
//! through a market-data provider. Individual job failures are recorded
//! and do not fail the process; only a fatal store error or an interrupt
//! produces a non-zero exit.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use diesel::prelude::*;
use tracing::{info, warn};

use market_feed::providers::{
    DailyPriceProvider, alpha_daily::AlphaDailyProvider, chart_history::ChartHistoryProvider,
};
use price_sync::{
    config, db,
    engine::{BatchOptions, IngestionEngine, RunMode},
    jobs::SqliteJobStore,
    models::{ErrorKind, JobStatus},
    prices::SqlitePriceStore,
    rate_limit::{self, FixedWindowLimiter},
};

#[derive(Parser)]
#[command(name = "price-sync", version, about = "Job-driven daily price ingestion")]
struct Cli {
    /// Database path/URL; falls back to the DATABASE_URL environment
    /// variable.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Ingest PENDING jobs for one trade date via the primary provider.
    Daily {
        /// Trade date (YYYY-MM-DD); defaults to yesterday.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Like daily, but requests the provider's full history window; use
    /// for dates older than the compact window.
    Backfill {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Re-attempt FAILED jobs with recoverable error tags via the
    /// fallback provider.
    Recover,
    /// Batched fallback ingestion with bounded retry and politeness
    /// pauses.
    Batch {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Symbols per multi-symbol request.
        #[arg(long, default_value_t = 200)]
        batch_size: usize,
    },
    /// List distinct symbols whose jobs failed with API-tagged errors.
    InvalidSymbols,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    db::migrate::run(&cli.database_url)?;
    let mut conn = db::connection::connect_sqlite(&cli.database_url)?;

    if matches!(cli.cmd, Cmd::InvalidSymbols) {
        return report_invalid_symbols(&mut conn);
    }

    let yesterday = || Utc::now().date_naive() - Duration::days(1);
    let (mode, provider): (RunMode, Box<dyn DailyPriceProvider>) = match cli.cmd {
        Cmd::Daily { date } => (
            RunMode::Daily {
                trade_date: date.unwrap_or_else(yesterday),
            },
            Box::new(AlphaDailyProvider::new(config::alpha_api_key()?)?),
        ),
        Cmd::Backfill { date } => (
            RunMode::Backfill {
                trade_date: date.unwrap_or_else(yesterday),
            },
            Box::new(AlphaDailyProvider::new(config::alpha_api_key()?)?),
        ),
        Cmd::Recover => (RunMode::Recovery, Box::new(ChartHistoryProvider::new()?)),
        Cmd::Batch { date, batch_size } => (
            RunMode::Batch {
                trade_date: date.unwrap_or_else(yesterday),
                options: BatchOptions {
                    batch_size,
                    ..Default::default()
                },
            },
            Box::new(ChartHistoryProvider::new()?),
        ),
        Cmd::InvalidSymbols => unreachable!("handled above"),
    };

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let flag = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received; stopping after the job in flight");
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    let job_store = SqliteJobStore;
    let price_store = SqlitePriceStore;
    let limiter = FixedWindowLimiter::new(rate_limit::MAX_REQUESTS_PER_MINUTE);
    let mut engine = IngestionEngine::new(provider.as_ref(), &job_store, &price_store, limiter)
        .with_cancel_flag(cancel);

    let summary = engine.run(&mut conn, &mode.config()).await?;
    info!(
        loaded = summary.loaded,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "all jobs handled"
    );
    Ok(())
}

/// Symbols that failed with vendor-reported errors are usually delisted or
/// misspelled tickers; surface them for operator review.
fn report_invalid_symbols(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    use price_sync::schema::ingest_jobs::dsl as ij;

    let symbols: Vec<String> = ij::ingest_jobs
        .filter(ij::status.eq(JobStatus::Failed.as_str()))
        .filter(ij::error_kind.eq_any([ErrorKind::Api.as_str(), ErrorKind::RateLimited.as_str()]))
        .select(ij::symbol)
        .distinct()
        .order(ij::symbol.asc())
        .load(conn)?;

    info!(count = symbols.len(), "symbols with API-tagged failures");
    for symbol in symbols {
        println!("{symbol}");
    }
    Ok(())
}
