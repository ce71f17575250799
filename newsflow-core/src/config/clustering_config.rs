use serde::{Deserialize, Serialize};

use super::defaults;

/// Decision-core configuration: score composition, time decay, thresholding,
/// candidate retrieval, conflict retries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Weight of semantic similarity in the composite score.
    pub alpha: f64,
    /// Weight of the time-decay factor. `alpha + beta = 1` is the
    /// reference setting but is not enforced.
    pub beta: f64,
    /// Time-decay rate per hour of candidate age.
    pub lambda_per_hour: f64,
    /// Base merge threshold; the dynamic threshold rises from here toward
    /// 1.0 as a candidate ages.
    pub base_threshold: f64,
    /// Candidate shortlist size requested from the vector index.
    pub top_k: usize,
    /// Bounded retries when the optimistic centroid update loses a race.
    pub conflict_retry_budget: u32,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            alpha: defaults::DEFAULT_ALPHA,
            beta: defaults::DEFAULT_BETA,
            lambda_per_hour: defaults::DEFAULT_LAMBDA_PER_HOUR,
            base_threshold: defaults::DEFAULT_BASE_THRESHOLD,
            top_k: defaults::DEFAULT_TOP_K,
            conflict_retry_budget: defaults::DEFAULT_CONFLICT_RETRY_BUDGET,
        }
    }
}
