//! Seams between the decision core and its external collaborators.

mod embedding;
mod index;
mod store;

pub use embedding::IEmbeddingProvider;
pub use index::{IVectorIndex, IndexHit};
pub use store::IIssueStore;
