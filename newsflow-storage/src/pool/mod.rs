//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use newsflow_core::errors::NewsflowResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(path: &Path, read_pool_size: usize) -> NewsflowResult<Self> {
        let writer = WriteConnection::open(path)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory pool (for testing). No read pool: in-memory read
    /// connections would be isolated databases that can't see the writer's
    /// changes, so all reads route through the writer.
    pub fn open_in_memory() -> NewsflowResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }
}
