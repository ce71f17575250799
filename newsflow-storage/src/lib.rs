//! # newsflow-storage
//!
//! The relational store behind the clustering engine, on SQLite via
//! `rusqlite`. Owns the authoritative copies of issues, articles, and
//! embeddings; the vector index is reconciled from here.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use newsflow_core::errors::{NewsflowError, StorageError};

/// Map a low-level storage failure into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> NewsflowError {
    NewsflowError::Storage(StorageError::SqliteError { message })
}
