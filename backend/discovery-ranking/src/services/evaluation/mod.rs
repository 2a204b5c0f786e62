// ============================================
// Playlist Evaluation
// ============================================
//
// Fairness metrics for a produced playlist, and the epsilon sweep that
// reruns the reranker over one candidate set for several exploration rates.
// Every sweep point uses the same seed, candidates and references, and owns
// its own generator, so points are directly comparable.

use crate::models::{Candidate, ReferenceStats};
use crate::services::exploration::{EpsilonGreedyReranker, Result};
use fairness_metrics::FairnessMetrics;
use serde::Serialize;
use tracing::info;

/// Exploration rates swept by default
pub const DEFAULT_SWEEP_EPSILONS: [f64; 7] = [0.0, 0.05, 0.1, 0.2, 0.3, 0.4, 0.5];

/// Metrics of one playlist, in output order, against the catalog popularity
pub fn evaluate_playlist<T: AsRef<Candidate>>(
    playlist: &[T],
    catalog_popularity: &[f64],
    threshold_percentile: f64,
) -> FairnessMetrics {
    let popularity: Vec<f64> = playlist.iter().map(|c| c.as_ref().popularity).collect();
    let genres: Vec<&str> = playlist.iter().map(|c| c.as_ref().genre.as_str()).collect();

    fairness_metrics::evaluate_playlist(
        &popularity,
        &genres,
        catalog_popularity,
        threshold_percentile,
    )
}

/// Mean relevance of a playlist; 0.0 when empty
pub fn average_relevance<T: AsRef<Candidate>>(playlist: &[T]) -> f64 {
    if playlist.is_empty() {
        return 0.0;
    }
    playlist
        .iter()
        .map(|c| c.as_ref().relevance_score)
        .sum::<f64>()
        / playlist.len() as f64
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub epsilon: f64,
    pub metrics: FairnessMetrics,
    pub avg_relevance: f64,
}

/// Inputs shared by every point of a sweep
pub struct SweepRequest<'a> {
    pub candidates: &'a [Candidate],
    pub k: usize,
    pub seed: u64,
    pub references: &'a ReferenceStats,
    pub catalog_popularity: &'a [f64],
    pub threshold_percentile: f64,
}

/// One `SweepPoint` per epsilon, in input order
///
/// Points are computed sequentially. Each owns its generator, so running them
/// in parallel would produce identical results.
pub fn epsilon_sweep(request: &SweepRequest<'_>, epsilons: &[f64]) -> Result<Vec<SweepPoint>> {
    let points = epsilons
        .iter()
        .map(|&epsilon| {
            let reranker = EpsilonGreedyReranker::new(epsilon)?;
            let playlist = reranker.rerank(
                request.candidates,
                request.k,
                request.seed,
                request.references,
            );

            Ok(SweepPoint {
                epsilon: reranker.epsilon(),
                metrics: evaluate_playlist(
                    &playlist,
                    request.catalog_popularity,
                    request.threshold_percentile,
                ),
                avg_relevance: average_relevance(&playlist),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        points = points.len(),
        k = request.k,
        seed = request.seed,
        "Epsilon sweep completed"
    );

    Ok(points)
}
