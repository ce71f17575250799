use super::issue::Issue;

/// A candidate issue after the scoring stage.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub issue: Issue,
    /// Cosine similarity between the article embedding and the centroid,
    /// in [-1, 1].
    pub similarity: f64,
    /// Time-decay weight `exp(-lambda * |dt_hours|)`, in (0, 1].
    pub time_weight: f64,
    /// Composite score `alpha * similarity + beta * time_weight`.
    pub score: f64,
    /// Per-candidate dynamic threshold the score must reach to merge.
    pub threshold: f64,
}
