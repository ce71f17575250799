/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider '{name}' unavailable")]
    ProviderUnavailable { name: String },

    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
