//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 64MB cache, 5s busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use newsflow_core::errors::NewsflowResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to a write connection.
pub fn apply_pragmas(conn: &Connection) -> NewsflowResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read connections. Journal mode is set by the writer;
/// read-only connections may not change it.
pub fn apply_read_pragmas(conn: &Connection) -> NewsflowResult<()> {
    conn.execute_batch(
        "
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> NewsflowResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
