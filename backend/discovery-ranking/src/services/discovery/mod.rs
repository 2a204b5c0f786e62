// ============================================
// Discovery Scorer
// ============================================
//
// Scores each candidate on how much it helps discovery:
//   discovery = 0.45 * genre_rarity + 0.35 * long_tail_bonus - 0.20 * pop_balance_penalty
//
// - genre_rarity: 1 / (reference count of the genre + eps)
// - long_tail_bonus: 1 - popularity min-max normalized against the reference range
// - pop_balance_penalty: distance from a target popularity, min-max normalized
//   over the candidate set
//
// References default to the candidate set itself when no catalog-wide
// statistics are supplied (see `ReferenceStats`).

use crate::models::{Candidate, ReferenceStats, ScoredCandidate};
use crate::utils::{median, min_max, normalize_score, RANGE_EPSILON};
use std::collections::HashMap;
use tracing::{debug, info};

pub const GENRE_RARITY_WEIGHT: f64 = 0.45;
pub const LONG_TAIL_WEIGHT: f64 = 0.35;
pub const POP_BALANCE_WEIGHT: f64 = 0.20;

/// Linear combination of the three components with the fixed policy weights
pub fn discovery_score(genre_rarity: f64, long_tail_bonus: f64, pop_balance_penalty: f64) -> f64 {
    GENRE_RARITY_WEIGHT * genre_rarity + LONG_TAIL_WEIGHT * long_tail_bonus
        - POP_BALANCE_WEIGHT * pop_balance_penalty
}

/// Attach discovery components to every candidate, preserving input order
///
/// `target_popularity` defaults to the median popularity of `candidates`.
pub fn score_candidates(
    candidates: &[Candidate],
    references: &ReferenceStats,
    target_popularity: Option<f64>,
) -> Vec<ScoredCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let popularity: Vec<f64> = candidates.iter().map(|c| c.popularity).collect();

    // 1) genre rarity
    let genre_counts: HashMap<&str, usize> = match &references.genres {
        Some(genres) => count_genres(genres.iter().map(String::as_str)),
        None => count_genres(candidates.iter().map(|c| c.genre.as_str())),
    };

    // 2) long-tail range: reference popularity (NaNs dropped), else candidates
    let candidate_range = min_max(&popularity).unwrap_or((0.0, 0.0));
    let (ref_min, ref_max) = references
        .popularity
        .as_deref()
        .and_then(min_max)
        .unwrap_or(candidate_range);

    // 3) popularity balance against the target
    let target = target_popularity
        .or_else(|| median(&popularity))
        .unwrap_or(0.0);
    let deviations: Vec<f64> = popularity.iter().map(|p| (p - target).abs()).collect();
    let penalties = balance_penalties(&deviations);

    let scored: Vec<ScoredCandidate> = candidates
        .iter()
        .zip(penalties)
        .map(|(candidate, pop_balance_penalty)| {
            let count = genre_counts
                .get(candidate.genre.as_str())
                .copied()
                .unwrap_or(0);
            let genre_rarity = 1.0 / (count as f64 + RANGE_EPSILON);
            let long_tail_bonus = 1.0 - normalize_score(candidate.popularity, ref_min, ref_max);

            let score = discovery_score(genre_rarity, long_tail_bonus, pop_balance_penalty);

            ScoredCandidate {
                candidate: candidate.clone(),
                genre_rarity,
                long_tail_bonus,
                pop_balance_penalty,
                discovery_score: score,
            }
        })
        .collect();

    debug!(
        ref_min = ref_min,
        ref_max = ref_max,
        target_popularity = target,
        distinct_genres = genre_counts.len(),
        "Discovery reference statistics"
    );
    info!(
        candidates = scored.len(),
        candidate_local = references.is_candidate_local(),
        "Discovery scores computed"
    );

    scored
}

fn count_genres<'a>(genres: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for genre in genres {
        *counts.entry(genre).or_insert(0) += 1;
    }
    counts
}

/// Min-max normalized deviations; all zero when every candidate is equidistant
fn balance_penalties(deviations: &[f64]) -> Vec<f64> {
    let (lo, hi) = match min_max(deviations) {
        Some(range) => range,
        None => return vec![0.0; deviations.len()],
    };

    if hi - lo < RANGE_EPSILON {
        return vec![0.0; deviations.len()];
    }

    deviations
        .iter()
        .map(|d| (d - lo) / (hi - lo + RANGE_EPSILON))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, genre: &str, popularity: f64) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: id.to_string(),
            artist: "artist".to_string(),
            genre: genre.to_string(),
            popularity,
            relevance_score: 0.5,
        }
    }

    #[test]
    fn test_empty_candidates() {
        assert!(score_candidates(&[], &ReferenceStats::candidate_local(), None).is_empty());
    }

    #[test]
    fn test_candidate_local_reference() {
        let candidates = vec![
            candidate("a", "rock", 10.0),
            candidate("b", "rock", 30.0),
            candidate("c", "jazz", 50.0),
        ];
        let scored = score_candidates(&candidates, &ReferenceStats::candidate_local(), None);

        assert!((scored[0].genre_rarity - 0.5).abs() < 1e-6);
        assert!((scored[2].genre_rarity - 1.0).abs() < 1e-6);

        // range 10..50 from the candidates themselves
        assert!((scored[0].long_tail_bonus - 1.0).abs() < 1e-6);
        assert!((scored[1].long_tail_bonus - 0.5).abs() < 1e-6);
        assert!(scored[2].long_tail_bonus.abs() < 1e-6);

        // median 30: deviations [20, 0, 20]
        assert!((scored[0].pop_balance_penalty - 1.0).abs() < 1e-6);
        assert_eq!(scored[1].pop_balance_penalty, 0.0);
        assert!((scored[2].pop_balance_penalty - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_catalog_reference_changes_scores() {
        let candidates = vec![candidate("a", "rock", 40.0), candidate("b", "jazz", 60.0)];
        let references = ReferenceStats {
            popularity: Some(vec![0.0, f64::NAN, 100.0]),
            genres: Some(vec!["rock".into(), "rock".into(), "rock".into(), "pop".into()]),
        };
        let scored = score_candidates(&candidates, &references, None);

        assert!((scored[0].genre_rarity - 1.0 / 3.0).abs() < 1e-6);
        // jazz never occurs in the reference
        assert!(scored[1].genre_rarity > 1e8);
        assert!((scored[0].long_tail_bonus - 0.6).abs() < 1e-6);
        assert!((scored[1].long_tail_bonus - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_empty_popularity_reference_falls_back() {
        let candidates = vec![candidate("a", "rock", 20.0), candidate("b", "rock", 40.0)];
        let references = ReferenceStats {
            popularity: Some(vec![f64::NAN]),
            genres: None,
        };
        let scored = score_candidates(&candidates, &references, None);
        assert!((scored[0].long_tail_bonus - 1.0).abs() < 1e-6);
        assert!(scored[1].long_tail_bonus.abs() < 1e-6);
    }

    #[test]
    fn test_equidistant_candidates_have_no_penalty() {
        let candidates = vec![candidate("a", "rock", 20.0), candidate("b", "pop", 40.0)];
        // target 30 is the median: both deviate by 10
        let scored = score_candidates(&candidates, &ReferenceStats::candidate_local(), None);
        assert!(scored.iter().all(|s| s.pop_balance_penalty == 0.0));
    }

    #[test]
    fn test_explicit_target_popularity() {
        let candidates = vec![
            candidate("a", "rock", 20.0),
            candidate("b", "rock", 40.0),
            candidate("c", "rock", 90.0),
        ];
        let scored = score_candidates(&candidates, &ReferenceStats::candidate_local(), Some(90.0));
        assert!((scored[0].pop_balance_penalty - 1.0).abs() < 1e-6);
        assert_eq!(scored[2].pop_balance_penalty, 0.0);
    }

    #[test]
    fn test_discovery_score_monotonicity() {
        let base = discovery_score(0.5, 0.5, 0.5);
        assert!(discovery_score(0.6, 0.5, 0.5) >= base);
        assert!(discovery_score(0.5, 0.6, 0.5) >= base);
        assert!(discovery_score(0.5, 0.5, 0.6) <= base);
    }
}
