//! L1 in-memory embedding cache using moka.
//!
//! Keys are blake3 hashes of the embedded text, so re-embedding an
//! identical article is a lookup, not a provider call.

use std::time::Duration;

use moka::sync::Cache;

/// L1 in-memory embedding cache.
pub struct L1EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1EmbeddingCache {
    /// Create a new cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();

        Self { cache }
    }

    /// Get an embedding by content hash.
    pub fn get(&self, content_hash: &str) -> Option<Vec<f32>> {
        self.cache.get(content_hash)
    }

    /// Insert an embedding keyed by content hash.
    pub fn insert(&self, content_hash: String, embedding: Vec<f32>) {
        self.cache.insert(content_hash, embedding);
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
