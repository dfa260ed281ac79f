//! Job-driven daily price ingestion.
//!
//! Pulls per-symbol, per-date jobs from the `ingest_jobs` table, fetches
//! daily bars through a [`market_feed`] provider, normalizes and validates
//! them, and persists canonical records into `daily_prices` with
//! insert-or-skip semantics. One run processes one job batch sequentially
//! and exits; cross-run retry happens by re-running against jobs still in a
//! PENDING or recoverable FAILED state.

pub mod config;
pub mod db;
pub mod engine;
pub mod jobs;
pub mod models;
pub mod normalize;
pub mod prices;
pub mod rate_limit;
pub mod schema;
