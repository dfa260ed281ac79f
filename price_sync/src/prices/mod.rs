//! Canonical price persistence.

pub mod repo;

use diesel::SqliteConnection;

use crate::{db::StoreError, models::PriceRecord};

pub use repo::SqlitePriceStore;

/// Result of an idempotent upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    /// A row for `(symbol, trade_date)` already existed and was left
    /// untouched.
    AlreadyExisted,
}

pub trait PriceStore: Send + Sync {
    /// Inserts the record unless a row with the same `(symbol, trade_date)`
    /// already exists. Insert-if-absent, never insert-or-update:
    /// corrections are out of scope and an existing row always wins.
    fn upsert(
        &self,
        conn: &mut SqliteConnection,
        record: &PriceRecord,
    ) -> Result<UpsertOutcome, StoreError>;
}
