//! Incremental centroid maintenance.

use newsflow_core::errors::{NewsflowError, NewsflowResult};

/// Moving-average centroid update for a merge:
///
/// ```text
/// C_new = (C_old * N + A) / (N + 1)
/// ```
///
/// Keeps the centroid equal to the arithmetic mean of all member
/// embeddings. No re-normalization — the centroid is not unit-length and
/// similarity uses the general cosine formula. Accumulates in f64 to keep
/// the error within tolerance over long-lived issues.
pub fn merge_centroid(old: &[f32], count: i64, embedding: &[f32]) -> NewsflowResult<Vec<f32>> {
    if count < 1 {
        return Err(NewsflowError::InvariantViolation {
            reason: format!("article_count {count} < 1 on merge"),
        });
    }
    if old.len() != embedding.len() {
        return Err(NewsflowError::InvariantViolation {
            reason: format!(
                "centroid dimension {} does not match embedding dimension {}",
                old.len(),
                embedding.len()
            ),
        });
    }

    let n = count as f64;
    Ok(old
        .iter()
        .zip(embedding.iter())
        .map(|(c, a)| (((*c as f64) * n + (*a as f64)) / (n + 1.0)) as f32)
        .collect())
}

/// Reject malformed vectors before they can poison an issue: wrong
/// dimension or non-finite components are invariant violations.
pub fn validate_vector(v: &[f32], expected_dim: usize, what: &str) -> NewsflowResult<()> {
    if v.len() != expected_dim {
        return Err(NewsflowError::InvariantViolation {
            reason: format!("{what} has dimension {}, expected {expected_dim}", v.len()),
        });
    }
    if let Some(i) = v.iter().position(|x| !x.is_finite()) {
        return Err(NewsflowError::InvariantViolation {
            reason: format!("{what} has non-finite value at dimension {i}"),
        });
    }
    Ok(())
}
