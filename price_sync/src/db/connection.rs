//! SQLite connection helper.
//!
//! Opens one connection for the whole run and applies the PRAGMAs the
//! stores rely on: WAL journaling, foreign keys, and a busy timeout so a
//! concurrent reader does not surface as an immediate lock error. The
//! engine owns this connection exclusively for the run's duration.

use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};

pub fn connect_sqlite(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)?;

    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA synchronous=NORMAL;").execute(&mut conn)?;
    sql_query("PRAGMA foreign_keys=ON;").execute(&mut conn)?;
    sql_query("PRAGMA busy_timeout=5000;").execute(&mut conn)?;
    Ok(conn)
}
