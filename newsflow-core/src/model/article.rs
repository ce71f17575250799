use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::UNASSIGNED_ISSUE_ID;

/// An incoming article before persistence. Immutable input event.
///
/// `title_hash` is the upstream dedup key (blake3 of the title); the
/// pipeline also uses it for idempotent replays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub source: String,
    pub url: String,
    pub title_hash: String,
    /// Publication timestamp, when the source provides one.
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleDraft {
    /// Build a draft, computing the title hash.
    pub fn new(title: &str, content: &str, source: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            source: source.to_string(),
            url: url.to_string(),
            title_hash: Self::compute_title_hash(title),
            published_at: None,
        }
    }

    /// blake3 hex digest of the title — the upstream dedup key.
    pub fn compute_title_hash(title: &str) -> String {
        blake3::hash(title.trim().to_lowercase().as_bytes())
            .to_hex()
            .to_string()
    }
}

/// A persisted article row. Assigned to exactly one issue, exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    /// Owning issue. `0` is the unassigned sentinel and must never be
    /// visible after the pipeline has run successfully.
    pub issue_id: i64,
    pub title: String,
    pub content: String,
    pub source: String,
    pub url: String,
    pub title_hash: String,
    /// Ingest time.
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Whether this article has been assigned to an issue.
    pub fn is_assigned(&self) -> bool {
        self.issue_id != UNASSIGNED_ISSUE_ID
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
