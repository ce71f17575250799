//! Embedding providers.

mod hashing;
mod rest;

pub use hashing::HashingProvider;
pub use rest::RestProvider;

use newsflow_core::config::EmbeddingConfig;
use newsflow_core::errors::{NewsflowError, NewsflowResult};
use newsflow_core::traits::IEmbeddingProvider;

/// Build the configured provider.
pub fn create_provider(config: &EmbeddingConfig) -> NewsflowResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "rest" => Ok(Box::new(RestProvider::new(
            &config.endpoint,
            &config.model_name,
            config.dimensions,
            config.timeout_secs,
        )?)),
        "hashing" => Ok(Box::new(HashingProvider::new(config.dimensions))),
        other => Err(NewsflowError::Config {
            reason: format!("unknown embedding provider '{other}'"),
        }),
    }
}
