//! EmbeddingEngine — the main entry point for newsflow-embeddings.
//!
//! Wraps the configured provider with a content-hash L1 cache and
//! dimension/finiteness validation. Implements `IEmbeddingProvider` so it
//! can be used anywhere a provider is expected.

use newsflow_core::config::EmbeddingConfig;
use newsflow_core::deadline::Deadline;
use newsflow_core::errors::NewsflowResult;
use newsflow_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::L1EmbeddingCache;
use crate::providers;
use crate::validate;

/// The main embedding engine.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: L1EmbeddingCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Create a new engine from configuration.
    pub fn new(config: &EmbeddingConfig) -> NewsflowResult<Self> {
        let provider = providers::create_provider(config)?;
        let cache = L1EmbeddingCache::new(config.l1_cache_size);

        info!(
            provider = provider.name(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );

        Ok(Self {
            provider,
            cache,
            dimensions: config.dimensions,
        })
    }

    /// Cache key: blake3 of title + content. Identical articles hit the
    /// cache, so replays yield the identical vector (idempotence).
    fn content_hash(title: &str, content: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(title.as_bytes());
        hasher.update(b"\n");
        hasher.update(content.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, title: &str, content: &str, deadline: &Deadline) -> NewsflowResult<Vec<f32>> {
        let hash = Self::content_hash(title, content);

        if let Some(vec) = self.cache.get(&hash) {
            debug!(hash = %hash, "embedding cache hit");
            return Ok(vec);
        }

        let embedding = self.provider.embed(title, content, deadline)?;

        validate::validate_dimensions(&embedding, self.dimensions)?;
        validate::validate_finite(&embedding)?;

        self.cache.insert(hash, embedding.clone());
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsflow_core::config::EmbeddingConfig;

    fn engine() -> EmbeddingEngine {
        let config = EmbeddingConfig {
            provider: "hashing".to_string(),
            dimensions: 128,
            ..Default::default()
        };
        EmbeddingEngine::new(&config).unwrap()
    }

    #[test]
    fn identical_input_yields_identical_vector() {
        let e = engine();
        let a = e.embed("title", "content", &Deadline::none()).unwrap();
        let b = e.embed("title", "content", &Deadline::none()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn second_call_is_served_from_cache() {
        let e = engine();
        let _ = e.embed("cached", "body", &Deadline::none()).unwrap();
        assert_eq!(e.cache.get(&EmbeddingEngine::content_hash("cached", "body")).map(|v| v.len()), Some(128));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = EmbeddingConfig {
            provider: "quantum".to_string(),
            ..Default::default()
        };
        assert!(EmbeddingEngine::new(&config).is_err());
    }
}
