use diesel::prelude::*;

use crate::{
    db::StoreError,
    models::PriceRecord,
    prices::{PriceStore, UpsertOutcome},
    schema::daily_prices::dsl as dp,
};

/// SQLite-backed price table.
pub struct SqlitePriceStore;

impl PriceStore for SqlitePriceStore {
    fn upsert(
        &self,
        conn: &mut SqliteConnection,
        record: &PriceRecord,
    ) -> Result<UpsertOutcome, StoreError> {
        let inserted = diesel::insert_into(dp::daily_prices)
            .values(record)
            .on_conflict((dp::symbol, dp::trade_date))
            .do_nothing()
            .execute(conn)?;

        Ok(if inserted == 0 {
            UpsertOutcome::AlreadyExisted
        } else {
            UpsertOutcome::Inserted
        })
    }
}
