//! Score composition: cosine similarity, time-decay weight, composite
//! score, and the per-candidate dynamic threshold.

use chrono::{DateTime, Utc};

use newsflow_core::constants::SECS_PER_HOUR;

/// Cosine of the angle between `a` and `b`, in [-1, 1].
///
/// Degenerate inputs — mismatched or empty slices, or a zero vector on
/// either side — score 0.0, so they can never win a shortlist slot.
/// Accumulates in f64 even though embeddings are f32: at 768 dimensions the
/// f32 partial sums lose enough precision to disturb close rankings.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (dot, a_sq, b_sq) = a.iter().zip(b).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, a_sq, b_sq), (&x, &y)| {
            let (x, y) = (x as f64, y as f64);
            (dot + x * y, a_sq + x * x, b_sq + y * y)
        },
    );
    if a_sq == 0.0 || b_sq == 0.0 {
        return 0.0;
    }
    // Rounding can push |cos| a hair past 1; pin it back.
    (dot / (a_sq * b_sq).sqrt()).max(-1.0).min(1.0)
}

/// Time-decay weight `exp(-lambda * |dt_hours|)`, in (0, 1].
///
/// The gap is taken as an absolute value so clock skew between the event
/// time and the issue's `updated_at` never produces a weight above 1.
pub fn time_decay_weight(
    updated_at: DateTime<Utc>,
    now: DateTime<Utc>,
    lambda_per_hour: f64,
) -> f64 {
    let dt_hours = (now - updated_at).num_seconds().abs() as f64 / SECS_PER_HOUR;
    (-lambda_per_hour * dt_hours).exp()
}

/// Composite score `alpha * similarity + beta * time_weight` — the ranking
/// quantity and the value gated by the dynamic threshold.
pub fn composite_score(similarity: f64, time_weight: f64, alpha: f64, beta: f64) -> f64 {
    alpha * similarity + beta * time_weight
}

/// Per-candidate dynamic threshold:
///
/// ```text
/// T_dynamic = T_base + (1 - T_base) * (1 - W_time)
/// ```
///
/// Equals `T_base` for a just-updated candidate and tends to 1 as the
/// candidate ages, so stale issues need an increasingly strong match.
pub fn dynamic_threshold(time_weight: f64, base_threshold: f64) -> f64 {
    base_threshold + (1.0 - base_threshold) * (1.0 - time_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn self_similarity_is_one() {
        let v = vec![0.2, -1.4, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn scaling_does_not_change_the_angle() {
        let a = vec![0.5, 1.0, -0.25];
        let b: Vec<f32> = a.iter().map(|x| x * 8.0).collect();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn perpendicular_vectors_score_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    }

    #[test]
    fn antipodal_vectors_score_minus_one() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        // Zero vector, empty slices, width mismatch.
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn fresh_candidate_has_unit_time_weight() {
        let now = Utc::now();
        let w = time_decay_weight(now, now, 1.0);
        assert!((w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ten_hours_at_unit_lambda_decays_to_e_minus_ten() {
        let now = Utc::now();
        let w = time_decay_weight(now - Duration::hours(10), now, 1.0);
        assert!((w - (-10.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn clock_skew_is_absolute() {
        // updated_at an hour in the future still decays, never amplifies.
        let now = Utc::now();
        let w = time_decay_weight(now + Duration::hours(1), now, 1.0);
        assert!(w < 1.0);
        assert!((w - (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn threshold_equals_base_when_fresh() {
        assert!((dynamic_threshold(1.0, 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn threshold_tends_to_one_for_stale_candidates() {
        let t = dynamic_threshold(1e-9, 0.5);
        assert!(t > 0.9999);
        assert!(t <= 1.0);
    }

    #[test]
    fn threshold_is_monotone_in_age() {
        let base = 0.5;
        let mut prev = dynamic_threshold(1.0, base);
        for w in [0.8, 0.5, 0.2, 0.05, 0.001] {
            let t = dynamic_threshold(w, base);
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn composite_score_reference_values() {
        // S1: sim = 1, w = 1 => score = 1 with the reference weights.
        assert!((composite_score(1.0, 1.0, 0.7, 0.3) - 1.0).abs() < 1e-12);
        // S2: sim = 1, w ~ 0 => score ~ alpha.
        let s = composite_score(1.0, (-10.0f64).exp(), 0.7, 0.3);
        assert!((s - 0.7).abs() < 1e-4);
    }
}
