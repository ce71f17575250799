/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("optimistic concurrency check failed for issue {issue_id} (expected article_count {expected_count})")]
    Conflict { issue_id: i64, expected_count: i64 },
}
