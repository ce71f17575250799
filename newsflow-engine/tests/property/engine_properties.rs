//! Property tests for the scoring and centroid math.

use chrono::{Duration, Utc};
use proptest::prelude::*;

use newsflow_engine::centroid::merge_centroid;
use newsflow_engine::scoring::{
    composite_score, cosine_similarity, dynamic_threshold, time_decay_weight,
};
use newsflow_engine::separability::separability;

fn arb_vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dim)
}

// ─── Cosine similarity ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn cosine_is_bounded_and_symmetric(a in arb_vector(8), b in arb_vector(8)) {
        let ab = cosine_similarity(&a, &b);
        prop_assert!((-1.0..=1.0).contains(&ab), "out of range: {ab}");
        let ba = cosine_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_a_vector_with_itself_is_one(a in arb_vector(8)) {
        prop_assume!(a.iter().any(|x| x.abs() > 1e-3));
        let sim = cosine_similarity(&a, &a);
        prop_assert!((sim - 1.0).abs() < 1e-9, "self-similarity was {sim}");
    }
}

// ─── Time decay ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn time_weight_is_in_unit_interval(hours in 0i64..100_000, lambda in 1e-4f64..10.0) {
        let now = Utc::now();
        let w = time_decay_weight(now - Duration::hours(hours), now, lambda);
        prop_assert!(w > 0.0 && w <= 1.0, "weight {w} out of (0, 1]");
    }

    #[test]
    fn time_weight_decreases_with_age(lambda in 1e-3f64..2.0) {
        let now = Utc::now();
        let mut prev = time_decay_weight(now, now, lambda);
        for hours in [1i64, 5, 24, 72, 720] {
            let w = time_decay_weight(now - Duration::hours(hours), now, lambda);
            prop_assert!(w <= prev + f64::EPSILON, "not monotone at {hours}h: {w} > {prev}");
            prev = w;
        }
    }
}

// ─── Dynamic threshold ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn threshold_is_bounded_by_base_and_one(
        w in 0.0f64..=1.0,
        base in 0.01f64..0.99,
    ) {
        let t = dynamic_threshold(w, base);
        prop_assert!(t >= base - 1e-12, "threshold {t} below base {base}");
        prop_assert!(t <= 1.0 + 1e-12, "threshold {t} above 1");
    }

    #[test]
    fn threshold_rises_as_the_candidate_ages(
        w_fresh in 0.5f64..=1.0,
        w_stale in 0.0f64..0.5,
        base in 0.01f64..0.99,
    ) {
        prop_assert!(dynamic_threshold(w_stale, base) >= dynamic_threshold(w_fresh, base));
    }

    // A score below the base threshold can never clear any dynamic
    // threshold, whatever the candidate's age.
    #[test]
    fn sub_base_scores_never_merge(
        sim in -1.0f64..=1.0,
        w in 0.0f64..=1.0,
        base in 0.01f64..0.99,
    ) {
        let score = composite_score(sim, w, 0.7, 0.3);
        prop_assume!(score < base);
        prop_assert!(score < dynamic_threshold(w, base));
    }
}

// ─── Separability ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn separability_never_exceeds_one(
        sim_best in -1.0f64..=1.0,
        sim_neighbor in -1.0f64..=1.0,
    ) {
        prop_assert!(separability(sim_best, sim_neighbor) <= 1.0 + 1e-12);
    }

    #[test]
    fn separability_is_positive_iff_best_is_strictly_closer(
        sim_best in -0.999f64..0.999,
        sim_neighbor in -0.999f64..0.999,
    ) {
        let s = separability(sim_best, sim_neighbor);
        if sim_best > sim_neighbor {
            prop_assert!(s > 0.0);
        } else if sim_best < sim_neighbor {
            prop_assert!(s < 0.0);
        } else {
            prop_assert_eq!(s, 0.0);
        }
    }
}

// ─── Centroid maintenance ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn centroid_stays_the_arithmetic_mean(
        members in prop::collection::vec(arb_vector(4), 1..24),
    ) {
        let mut centroid = members[0].clone();
        for (i, member) in members.iter().enumerate().skip(1) {
            centroid = merge_centroid(&centroid, i as i64, member).unwrap();
        }

        let n = members.len() as f64;
        for d in 0..4 {
            let mean: f64 = members.iter().map(|m| m[d] as f64).sum::<f64>() / n;
            prop_assert!(
                (centroid[d] as f64 - mean).abs() <= 1e-4 * n,
                "dimension {}: {} vs mean {}",
                d,
                centroid[d],
                mean
            );
        }
    }

    #[test]
    fn merge_preserves_dimension(old in arb_vector(16), new in arb_vector(16), n in 1i64..1000) {
        let merged = merge_centroid(&old, n, &new).unwrap();
        prop_assert_eq!(merged.len(), 16);
    }
}
