/// Newsflow system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Embedding dimensionality. Fixed by the embedding model contract.
pub const EMBEDDING_DIM: usize = 768;

/// Seconds per hour — time gaps are measured in hours throughout.
pub const SECS_PER_HOUR: f64 = 3600.0;

/// Sentinel `issue_id` for an article that has not been assigned yet.
/// Must never be visible after the pipeline has run successfully.
pub const UNASSIGNED_ISSUE_ID: i64 = 0;
