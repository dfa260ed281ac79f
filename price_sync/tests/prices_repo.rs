mod common;

use chrono::NaiveDate;
use price_sync::models::PriceRecord;
use price_sync::prices::{PriceStore, SqlitePriceStore, UpsertOutcome};

fn record(symbol: &str, trade_date: NaiveDate, close: f64) -> PriceRecord {
    PriceRecord {
        symbol: symbol.to_string(),
        trade_date,
        open: 150.0,
        high: 151.25,
        low: 149.5,
        close,
        adjusted_close: close,
        volume: 1_000_000,
        dividend_amount: 0.0,
        split_coefficient: 1.0,
    }
}

#[test]
fn first_write_inserts() {
    let (_db, mut conn) = common::setup_db();
    let outcome = SqlitePriceStore
        .upsert(&mut conn, &record("AAPL", common::date("2025-06-23"), 150.1234))
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Inserted);

    let row = common::price_row(&mut conn, "AAPL", "2025-06-23").unwrap();
    assert_eq!(row.close, 150.1234);
    assert_eq!(row.volume, 1_000_000);
}

#[test]
fn duplicate_write_is_skipped_and_the_original_row_wins() {
    let (_db, mut conn) = common::setup_db();
    let date = common::date("2025-06-23");
    let store = SqlitePriceStore;

    store.upsert(&mut conn, &record("AAPL", date, 150.1234)).unwrap();
    let outcome = store.upsert(&mut conn, &record("AAPL", date, 999.0)).unwrap();
    assert_eq!(outcome, UpsertOutcome::AlreadyExisted);

    let row = common::price_row(&mut conn, "AAPL", "2025-06-23").unwrap();
    assert_eq!(row.close, 150.1234);
    assert_eq!(common::price_count(&mut conn), 1);
}

#[test]
fn same_symbol_on_different_dates_both_insert() {
    let (_db, mut conn) = common::setup_db();
    let store = SqlitePriceStore;

    let first = store
        .upsert(&mut conn, &record("AAPL", common::date("2025-06-23"), 150.1234))
        .unwrap();
    let second = store
        .upsert(&mut conn, &record("AAPL", common::date("2025-06-24"), 151.5))
        .unwrap();

    assert_eq!(first, UpsertOutcome::Inserted);
    assert_eq!(second, UpsertOutcome::Inserted);
    assert_eq!(common::price_count(&mut conn), 2);
}
