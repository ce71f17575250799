//! # newsflow-embeddings
//!
//! Embedding intake for the clustering engine: provider implementations,
//! a content-hash L1 cache, and dimension/finiteness validation.
//! The embedding model itself is an external black box.

mod cache;
mod engine;
pub mod providers;
pub mod validate;

pub use cache::L1EmbeddingCache;
pub use engine::EmbeddingEngine;
