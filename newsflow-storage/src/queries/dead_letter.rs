//! Dead-letter sink for poison articles (invariant violations).

use rusqlite::{params, Connection};

use newsflow_core::errors::NewsflowResult;

use crate::to_storage_err;

pub fn insert_dead_letter(
    conn: &Connection,
    title_hash: &str,
    payload: &str,
    reason: &str,
) -> NewsflowResult<()> {
    conn.execute(
        "INSERT INTO dead_letter (title_hash, payload, reason) VALUES (?1, ?2, ?3)",
        params![title_hash, payload, reason],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Number of dead letters recorded (triage/monitoring).
pub fn dead_letter_count(conn: &Connection) -> NewsflowResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM dead_letter", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}
