use crate::models::Candidate;
use crate::utils::descending;
use tracing::info;

/// Ranking Layer - relevance-ordered baseline
pub struct RankingLayer;

impl Default for RankingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingLayer {
    pub fn new() -> Self {
        Self
    }

    /// Candidates sorted by relevance, descending
    /// Note: ties (and NaN scores) keep their input order
    pub fn rank_candidates(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        let mut ranked = candidates.to_vec();
        ranked.sort_by(|a, b| descending(a.relevance_score, b.relevance_score));
        ranked
    }

    /// Top `k` by relevance, without any discovery reranking
    pub fn baseline_playlist(&self, candidates: &[Candidate], k: usize) -> Vec<Candidate> {
        let mut ranked = self.rank_candidates(candidates);
        ranked.truncate(k);

        info!(
            candidates = candidates.len(),
            selected = ranked.len(),
            "Baseline playlist built"
        );

        ranked
    }
}
