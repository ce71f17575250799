//! The single write connection, serialized behind a mutex.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use newsflow_core::errors::NewsflowResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Exclusive write connection. All mutations are funneled through here,
/// which serializes commits across threads.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open (and create if absent) the database file.
    pub fn open(path: &Path) -> NewsflowResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> NewsflowResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure while holding the writer.
    pub fn with_conn_sync<F, T>(&self, f: F) -> NewsflowResult<T>
    where
        F: FnOnce(&Connection) -> NewsflowResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
