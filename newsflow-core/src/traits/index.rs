use chrono::{DateTime, Utc};

use crate::errors::NewsflowResult;

/// One search hit from the vector index.
#[derive(Debug, Clone)]
pub struct IndexHit {
    pub issue_id: i64,
    /// The index's copy of the centroid. The relational store is
    /// authoritative; the pipeline re-reads the issue row before scoring.
    pub centroid: Vec<f32>,
    pub updated_at: DateTime<Utc>,
}

/// Nearest-neighbor index over issue centroids.
///
/// Implementations may be exact (brute force) or approximate; the caller
/// tolerates fewer than `k` results, including zero.
pub trait IVectorIndex: Send + Sync {
    /// Top-k issues by cosine similarity to `vector`, ordered by
    /// similarity descending.
    fn search(&self, vector: &[f32], k: usize) -> NewsflowResult<Vec<IndexHit>>;

    /// Insert or replace the centroid for an issue.
    fn upsert(&self, issue_id: i64, centroid: &[f32], updated_at: DateTime<Utc>)
        -> NewsflowResult<()>;

    /// Number of issues currently indexed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
