use crate::deadline::Deadline;
use crate::errors::NewsflowResult;

/// Embedding generation provider.
///
/// Must be deterministic for identical input within a model version.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed an article's title and content into one dense vector.
    ///
    /// The deadline bounds the call; providers with network transports
    /// derive their request timeout from it.
    fn embed(&self, title: &str, content: &str, deadline: &Deadline) -> NewsflowResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
