//! Versioned schema migrations, applied in order on startup.

pub mod v001_core_tables;

use rusqlite::Connection;

use newsflow_core::errors::{NewsflowError, NewsflowResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> NewsflowResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_core_tables::migrate)];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> NewsflowResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current: u32 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            NewsflowError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [*version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(version, "applied schema migration");
    }

    Ok(())
}
