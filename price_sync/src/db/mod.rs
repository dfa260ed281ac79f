//! Database utilities: connections, embedded migrations, and the store
//! error type shared by the job and price repositories.

pub mod connection;
pub mod migrate;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Error surfaced by the job and price stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DieselError),
}

impl StoreError {
    /// True when the connection itself is gone.
    ///
    /// A constraint violation fails one job; a dead connection means the
    /// run can no longer record outcomes and must abort instead of
    /// silently producing an incomplete batch.
    pub fn is_connection_fatal(&self) -> bool {
        match self {
            StoreError::Database(DieselError::DatabaseError(kind, _)) => matches!(
                kind,
                DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand
            ),
            StoreError::Database(DieselError::BrokenTransactionManager) => true,
            _ => false,
        }
    }
}
