//! Exact in-memory vector index: brute-force cosine over all centroids.
//!
//! The production index may be an external approximate-nearest-neighbor
//! store behind the same trait; this one is exact, lock-free for readers,
//! and what the test suite runs against. The width is fixed at
//! construction and every vector crossing the boundary is checked against
//! it.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use newsflow_core::errors::{IndexError, NewsflowResult};
use newsflow_core::traits::{IVectorIndex, IndexHit};

use crate::scoring::cosine_similarity;

struct Entry {
    centroid: Vec<f32>,
    updated_at: DateTime<Utc>,
}

/// Brute-force exact index over issue centroids.
pub struct InMemoryIndex {
    dimensions: usize,
    entries: DashMap<i64, Entry>,
}

impl InMemoryIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: DashMap::new(),
        }
    }

    fn check_width(&self, vector: &[f32]) -> NewsflowResult<()> {
        if vector.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IVectorIndex for InMemoryIndex {
    fn search(&self, vector: &[f32], k: usize) -> NewsflowResult<Vec<IndexHit>> {
        self.check_width(vector)?;

        // A zero-norm query has no meaningful neighbors.
        if vector.iter().all(|x| *x == 0.0) {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f64, IndexHit)> = self
            .entries
            .iter()
            .map(|entry| {
                let sim = cosine_similarity(vector, &entry.centroid);
                (
                    sim,
                    IndexHit {
                        issue_id: *entry.key(),
                        centroid: entry.centroid.clone(),
                        updated_at: entry.updated_at,
                    },
                )
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored.into_iter().map(|(_, hit)| hit).collect())
    }

    fn upsert(
        &self,
        issue_id: i64,
        centroid: &[f32],
        updated_at: DateTime<Utc>,
    ) -> NewsflowResult<()> {
        self.check_width(centroid)?;
        self.entries.insert(
            issue_id,
            Entry {
                centroid: centroid.to_vec(),
                updated_at,
            },
        );
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsflow_core::errors::NewsflowError;

    fn index_with(entries: &[(i64, Vec<f32>)]) -> InMemoryIndex {
        let index = InMemoryIndex::new(2);
        let now = Utc::now();
        for (id, centroid) in entries {
            index.upsert(*id, centroid, now).unwrap();
        }
        index
    }

    #[test]
    fn empty_index_returns_no_hits() {
        let index = InMemoryIndex::new(2);
        assert!(index.search(&[1.0, 0.0], 10).unwrap().is_empty());
    }

    #[test]
    fn hits_are_ordered_by_similarity() {
        let index = index_with(&[
            (1, vec![0.0, 1.0]),
            (2, vec![1.0, 0.0]),
            (3, vec![0.7, 0.7]),
        ]);
        let hits = index.search(&[1.0, 0.0], 3).unwrap();
        let ids: Vec<i64> = hits.iter().map(|h| h.issue_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn k_truncates_the_result() {
        let index = index_with(&[(1, vec![1.0, 0.0]), (2, vec![0.9, 0.1]), (3, vec![0.0, 1.0])]);
        assert_eq!(index.search(&[1.0, 0.0], 2).unwrap().len(), 2);
    }

    #[test]
    fn fewer_entries_than_k_is_fine() {
        let index = index_with(&[(1, vec![1.0, 0.0])]);
        assert_eq!(index.search(&[1.0, 0.0], 10).unwrap().len(), 1);
    }

    #[test]
    fn zero_norm_query_returns_nothing() {
        let index = index_with(&[(1, vec![1.0, 0.0])]);
        assert!(index.search(&[0.0, 0.0], 10).unwrap().is_empty());
    }

    #[test]
    fn upsert_replaces_the_centroid() {
        let index = index_with(&[(1, vec![1.0, 0.0])]);
        index.upsert(1, &[0.0, 1.0], Utc::now()).unwrap();
        assert_eq!(index.len(), 1);
        let hits = index.search(&[0.0, 1.0], 1).unwrap();
        assert_eq!(hits[0].centroid, vec![0.0, 1.0]);
    }

    #[test]
    fn wrong_width_vectors_are_rejected() {
        let index = InMemoryIndex::new(2);

        let err = index.search(&[1.0, 0.0, 0.0], 5).unwrap_err();
        assert!(matches!(
            err,
            NewsflowError::Index(IndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(err.is_retryable());

        let err = index.upsert(7, &[1.0], Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            NewsflowError::Index(IndexError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
