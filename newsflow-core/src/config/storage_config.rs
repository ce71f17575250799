use serde::{Deserialize, Serialize};

use super::defaults;

/// Relational store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path.
    pub path: String,
    /// Read connection pool size.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_STORAGE_PATH.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
