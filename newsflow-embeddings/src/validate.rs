//! Embedding validation applied to every provider response.

use newsflow_core::errors::{EmbeddingError, NewsflowError, NewsflowResult};

/// Validate that an embedding has the expected dimensions.
///
/// # Errors
/// Returns `DimensionMismatch` if dimensions don't match — an upstream
/// embedder fault, recoverable by the caller.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> NewsflowResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }
        .into());
    }
    Ok(())
}

/// Reject vectors containing NaN or infinity.
///
/// # Errors
/// Returns `InvariantViolation` — poison, the article goes to the
/// dead-letter collector rather than being retried.
pub fn validate_finite(embedding: &[f32]) -> NewsflowResult<()> {
    if let Some(i) = embedding.iter().position(|v| !v.is_finite()) {
        return Err(NewsflowError::InvariantViolation {
            reason: format!("non-finite value in embedding at dimension {i}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_dimensions_pass() {
        let v = vec![0.0; 768];
        assert!(validate_dimensions(&v, 768).is_ok());
    }

    #[test]
    fn wrong_dimensions_fail() {
        let v = vec![0.0; 384];
        let err = validate_dimensions(&v, 768).unwrap_err();
        assert!(matches!(
            err,
            NewsflowError::Embedding(EmbeddingError::DimensionMismatch {
                expected: 768,
                actual: 384
            })
        ));
    }

    #[test]
    fn nan_is_poison() {
        let v = vec![0.0, f32::NAN, 1.0];
        let err = validate_finite(&v).unwrap_err();
        assert!(err.is_poison());
    }

    #[test]
    fn infinity_is_poison() {
        let v = vec![f32::INFINITY];
        assert!(validate_finite(&v).is_err());
    }
}
