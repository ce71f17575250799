//! Candidate ranking with deterministic tie-breaking.

use std::cmp::Ordering;

use newsflow_core::model::Candidate;

/// Sort candidates best-first: score descending, ties broken by more
/// recent `updated_at`, then larger `article_count`, then smaller `id`.
/// Deterministic, so replaying the same candidate list reproduces the
/// same decision.
pub fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(compare);
}

fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.issue.updated_at.cmp(&a.issue.updated_at))
        .then_with(|| b.issue.article_count.cmp(&a.issue.article_count))
        .then_with(|| a.issue.id.cmp(&b.issue.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use newsflow_core::model::Issue;

    fn candidate(id: i64, score: f64, updated_hours_ago: i64, article_count: i64) -> Candidate {
        let now = Utc::now();
        let updated_at = now - Duration::hours(updated_hours_ago);
        Candidate {
            issue: Issue {
                id,
                title: format!("issue {id}"),
                content: String::new(),
                centroid: vec![1.0, 0.0],
                article_count,
                started_at: updated_at,
                updated_at,
                created_at: updated_at,
            },
            similarity: 0.0,
            time_weight: 0.0,
            score,
            threshold: 0.5,
        }
    }

    #[test]
    fn higher_score_wins() {
        let mut c = vec![candidate(1, 0.6, 0, 1), candidate(2, 0.9, 0, 1)];
        rank(&mut c);
        assert_eq!(c[0].issue.id, 2);
    }

    #[test]
    fn equal_scores_prefer_more_recent_update() {
        let mut c = vec![candidate(1, 0.8, 5, 1), candidate(2, 0.8, 1, 1)];
        rank(&mut c);
        assert_eq!(c[0].issue.id, 2);
    }

    #[test]
    fn equal_scores_and_times_prefer_larger_issue() {
        let mut c = vec![candidate(1, 0.8, 2, 3), candidate(2, 0.8, 2, 10)];
        rank(&mut c);
        assert_eq!(c[0].issue.id, 2);
    }

    #[test]
    fn full_tie_prefers_smaller_id() {
        let mut c = vec![candidate(9, 0.8, 2, 5), candidate(4, 0.8, 2, 5)];
        rank(&mut c);
        assert_eq!(c[0].issue.id, 4);
    }

    #[test]
    fn ranking_is_deterministic_under_permutation() {
        let a = vec![
            candidate(3, 0.7, 1, 2),
            candidate(1, 0.7, 1, 2),
            candidate(2, 0.9, 4, 1),
        ];
        let mut left = a.clone();
        let mut right: Vec<_> = a.into_iter().rev().collect();
        rank(&mut left);
        rank(&mut right);
        let ids: Vec<i64> = left.iter().map(|c| c.issue.id).collect();
        let rids: Vec<i64> = right.iter().map(|c| c.issue.id).collect();
        assert_eq!(ids, rids);
        assert_eq!(ids, vec![2, 1, 3]);
    }
}
