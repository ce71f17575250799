//! Error types for every subsystem, composed into [`NewsflowError`].
//!
//! Propagation policy: everything except `InvariantViolation` is recoverable
//! by the caller (retry the article). `InvariantViolation` is poison — it is
//! logged, routed to the dead-letter table, and never retried blindly.

mod embedding_error;
mod index_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use storage_error::StorageError;

use crate::model::PipelineStage;

/// Top-level error for the newsflow engine.
#[derive(Debug, thiserror::Error)]
pub enum NewsflowError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("deadline exceeded entering stage {stage}")]
    DeadlineExceeded { stage: PipelineStage },

    #[error("conflict retry budget exhausted for issue {issue_id} after {attempts} attempts")]
    ConflictExhausted { issue_id: i64, attempts: u32 },

    #[error("invariant violation: {reason}")]
    InvariantViolation { reason: String },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

/// Result alias used across the workspace.
pub type NewsflowResult<T> = Result<T, NewsflowError>;

impl NewsflowError {
    /// Whether the caller may retry the article after this error.
    ///
    /// Invariant violations are poison and must go to the dead-letter
    /// collector instead; configuration errors need operator action.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            NewsflowError::InvariantViolation { .. } | NewsflowError::Config { .. }
        )
    }

    /// Whether this error must be routed to the dead-letter collector.
    pub fn is_poison(&self) -> bool {
        matches!(self, NewsflowError::InvariantViolation { .. })
    }
}
