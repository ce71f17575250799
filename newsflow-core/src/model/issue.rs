use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A live cluster of articles covering the same real-world event.
///
/// Invariants:
/// - `centroid` equals the arithmetic mean of all member embeddings.
/// - `article_count >= 1` and equals the number of articles owned.
/// - `started_at` never changes after creation; `updated_at` is
///   monotonically non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    /// Representative text — the first member's title. Not load-bearing
    /// for clustering.
    pub title: String,
    pub content: String,
    /// Mean vector of member embeddings. Not unit-length; similarity uses
    /// the general cosine formula.
    pub centroid: Vec<f32>,
    pub article_count: i64,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
