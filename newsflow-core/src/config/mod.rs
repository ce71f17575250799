//! Configuration: serde structs with per-field defaults, TOML loading,
//! and a validation pass run before the engine starts.

pub mod defaults;

mod clustering_config;
mod embedding_config;
mod storage_config;

pub use clustering_config::ClusteringConfig;
pub use embedding_config::EmbeddingConfig;
pub use storage_config::StorageConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{NewsflowError, NewsflowResult};

/// Top-level configuration for the whole workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsflowConfig {
    pub clustering: ClusteringConfig,
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
}

impl NewsflowConfig {
    /// Parse a TOML document. Missing sections and fields fall back to
    /// their defaults.
    pub fn from_toml_str(input: &str) -> NewsflowResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| NewsflowError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> NewsflowResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| NewsflowError::Config {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Reject configurations the decision core cannot run with.
    pub fn validate(&self) -> NewsflowResult<()> {
        let c = &self.clustering;
        if c.alpha < 0.0 || c.beta < 0.0 {
            return Err(invalid("alpha and beta must be non-negative"));
        }
        if c.lambda_per_hour <= 0.0 {
            return Err(invalid("lambda_per_hour must be positive"));
        }
        if !(c.base_threshold > 0.0 && c.base_threshold < 1.0) {
            return Err(invalid("base_threshold must lie in (0, 1)"));
        }
        if c.top_k == 0 {
            return Err(invalid("top_k must be at least 1"));
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding dimensions must be positive"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> NewsflowError {
    NewsflowError::Config {
        reason: reason.to_string(),
    }
}
