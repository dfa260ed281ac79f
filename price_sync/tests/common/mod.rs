#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use price_sync::db::{connection, migrate};
use tempfile::TempDir;

pub struct TestDb {
    // Keep the tempdir alive for the life of the test.
    _dir: TempDir,
    pub path: String,
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run(&path).expect("migrations");
    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date literal")
}

pub fn seed_job(conn: &mut SqliteConnection, symbol: &str, trade_date: &str) -> i32 {
    use price_sync::schema::ingest_jobs::dsl as ij;

    diesel::insert_into(ij::ingest_jobs)
        .values((
            ij::symbol.eq(symbol),
            ij::trade_date.eq(date(trade_date)),
            ij::status.eq("PENDING"),
        ))
        .returning(ij::job_id)
        .get_result(conn)
        .expect("seed job")
}

#[derive(Debug, Queryable)]
pub struct JobRow {
    pub status: String,
    pub error_message: Option<String>,
    pub error_kind: Option<String>,
    pub last_attempted: Option<NaiveDateTime>,
}

pub fn job_row(conn: &mut SqliteConnection, job_id: i32) -> JobRow {
    use price_sync::schema::ingest_jobs::dsl as ij;

    ij::ingest_jobs
        .find(job_id)
        .select((ij::status, ij::error_message, ij::error_kind, ij::last_attempted))
        .first(conn)
        .expect("job row")
}

#[derive(Debug, Queryable)]
pub struct PriceRow {
    pub open: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: i64,
    pub dividend_amount: f64,
    pub split_coefficient: f64,
}

pub fn price_row(conn: &mut SqliteConnection, symbol: &str, trade_date: &str) -> Option<PriceRow> {
    use price_sync::schema::daily_prices::dsl as dp;

    dp::daily_prices
        .find((symbol, date(trade_date)))
        .select((
            dp::open,
            dp::close,
            dp::adjusted_close,
            dp::volume,
            dp::dividend_amount,
            dp::split_coefficient,
        ))
        .first(conn)
        .optional()
        .expect("price row query")
}

pub fn price_count(conn: &mut SqliteConnection) -> i64 {
    use price_sync::schema::daily_prices::dsl as dp;

    dp::daily_prices.count().get_result(conn).expect("count")
}

pub fn pending_count(conn: &mut SqliteConnection) -> i64 {
    use price_sync::schema::ingest_jobs::dsl as ij;

    ij::ingest_jobs
        .filter(ij::status.eq("PENDING"))
        .count()
        .get_result(conn)
        .expect("pending count")
}
