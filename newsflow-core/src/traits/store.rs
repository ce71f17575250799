use chrono::{DateTime, Utc};

use crate::errors::NewsflowResult;
use crate::model::{Article, ArticleDraft, Issue};

/// The relational store: issues, articles, embeddings, dead letters.
///
/// Both commit operations are single transactions — either the article row,
/// its embedding, and the issue mutation all land, or none do. `merge_article`
/// carries a compare-and-set on `article_count` so concurrent merges into the
/// same issue serialize; losing the race returns `StorageError::Conflict` and
/// the caller retries with fresh issue state.
pub trait IIssueStore: Send + Sync {
    // --- Reads ---

    /// Look up an already-ingested article by its dedup key.
    fn find_article_by_title_hash(&self, title_hash: &str) -> NewsflowResult<Option<Article>>;

    /// Fetch an issue row together with its centroid.
    fn get_issue(&self, id: i64) -> NewsflowResult<Option<Issue>>;

    /// All articles owned by an issue.
    fn articles_for_issue(&self, issue_id: i64) -> NewsflowResult<Vec<Article>>;

    /// Stored embeddings of all articles owned by an issue.
    fn embeddings_for_issue(&self, issue_id: i64) -> NewsflowResult<Vec<Vec<f32>>>;

    /// Every issue with its centroid — used to warm the vector index from
    /// the authoritative store at startup.
    fn list_issues(&self) -> NewsflowResult<Vec<Issue>>;

    // --- Commits ---

    /// Open a new issue around `draft`: issue row with `article_count = 1`
    /// and `started_at = updated_at = now`, the article row, the article
    /// embedding, and the issue centroid (= the article embedding).
    fn create_issue(
        &self,
        draft: &ArticleDraft,
        embedding: &[f32],
        now: DateTime<Utc>,
    ) -> NewsflowResult<(Issue, Article)>;

    /// Merge `draft` into `issue_id`: bump `article_count` iff it still
    /// equals `expected_count`, stamp `updated_at`, write the article row and
    /// embedding, and replace the centroid with `new_centroid`.
    fn merge_article(
        &self,
        draft: &ArticleDraft,
        embedding: &[f32],
        issue_id: i64,
        expected_count: i64,
        new_centroid: &[f32],
        now: DateTime<Utc>,
    ) -> NewsflowResult<(Issue, Article)>;

    // --- Aggregation ---

    fn issue_count(&self) -> NewsflowResult<usize>;

    // --- Dead letters ---

    /// Record a poison article (invariant violation) for offline triage.
    fn record_dead_letter(
        &self,
        title_hash: &str,
        payload: &str,
        reason: &str,
    ) -> NewsflowResult<()>;
}
