use serde::{Deserialize, Serialize};

use super::article::Article;
use super::issue::Issue;

/// Per-article pipeline stage. Transitions are strictly linear:
/// `Received -> Embedded -> Scored -> {Merged, Created}`, no back-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    Embedded,
    Scored,
    Merged,
    Created,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipelineStage::Received => "received",
            PipelineStage::Embedded => "embedded",
            PipelineStage::Scored => "scored",
            PipelineStage::Merged => "merged",
            PipelineStage::Created => "created",
        };
        f.write_str(s)
    }
}

/// Outcome of running the pipeline on one article.
#[derive(Debug, Clone)]
pub enum Decision {
    /// The article joined an existing issue.
    Merged {
        issue: Issue,
        article: Article,
        similarity: f64,
        score: f64,
        separability: f64,
    },
    /// No candidate cleared its threshold (or separability vetoed the
    /// best) — a fresh issue was opened around this article.
    Created { issue: Issue, article: Article },
    /// The title hash was already assigned — idempotent replay, nothing
    /// written.
    Duplicate { article: Article },
}

impl Decision {
    /// The issue the article ended up in.
    pub fn issue_id(&self) -> i64 {
        match self {
            Decision::Merged { issue, .. } | Decision::Created { issue, .. } => issue.id,
            Decision::Duplicate { article } => article.issue_id,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Decision::Merged { .. })
    }
}
