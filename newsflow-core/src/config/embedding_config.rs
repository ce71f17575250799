use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::EMBEDDING_DIM;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider kind: `rest` (remote embedder) or `hashing`
    /// (deterministic in-process fallback).
    pub provider: String,
    /// Remote embedder endpoint (REST provider only).
    pub endpoint: String,
    /// Model identifier sent with each request.
    pub model_name: String,
    /// Embedding dimensionality. Fixed by the model contract.
    pub dimensions: usize,
    /// Per-request timeout in seconds, capped by the article deadline.
    pub timeout_secs: u64,
    /// L1 cache capacity (entries).
    pub l1_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            model_name: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: EMBEDDING_DIM,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
        }
    }
}
