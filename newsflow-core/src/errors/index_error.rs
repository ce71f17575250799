/// Vector index errors.
///
/// A short or empty candidate list is NOT an error — the pipeline proceeds
/// and creates a new issue. The in-tree index is exact and in-process, so
/// the only fault it can raise is a vector of the wrong width; an
/// implementation over a remote store would extend this with its transport
/// failures.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("vector index is {expected}-dimensional, got a {actual}-dimensional vector")]
    DimensionMismatch { expected: usize, actual: usize },
}
