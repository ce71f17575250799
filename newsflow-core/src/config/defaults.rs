//! Default values for every configuration knob.

/// Weight of semantic similarity in the composite score.
pub const DEFAULT_ALPHA: f64 = 0.7;

/// Weight of the time-decay factor in the composite score.
pub const DEFAULT_BETA: f64 = 0.3;

/// Time-decay rate per hour — a half-life on the order of 24 hours.
pub const DEFAULT_LAMBDA_PER_HOUR: f64 = 1.0 / 24.0;

/// Base dynamic threshold.
pub const DEFAULT_BASE_THRESHOLD: f64 = 0.5;

/// Candidate shortlist size.
pub const DEFAULT_TOP_K: usize = 10;

/// Bounded retries for optimistic centroid-update conflicts.
pub const DEFAULT_CONFLICT_RETRY_BUDGET: u32 = 3;

/// Embedding provider kind.
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashing";

/// Remote embedder endpoint (REST provider only).
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "http://127.0.0.1:8900/embed";

/// Embedding model identifier sent to the remote embedder.
pub const DEFAULT_EMBEDDING_MODEL: &str = "news-encoder-v1";

/// Per-request embedder timeout (seconds), before deadline capping.
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 10;

/// L1 embedding cache capacity (entries).
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;

/// SQLite database path.
pub const DEFAULT_STORAGE_PATH: &str = "newsflow.db";

/// Read connection pool size.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
