use super::rng::{pick_index, SelectionRng};
use super::{ExplorationError, Result};
use crate::models::{Candidate, Playlist, ReferenceStats, ScoredCandidate};
use crate::services::discovery::score_candidates;
use crate::utils::{descending, median};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

/// Exploratory rounds pick among this many top discovery candidates
pub const DEFAULT_EXPLORE_POOL_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundKind {
    Explore,
    Exploit,
}

/// Selected list plus the kind of every round, in round order
#[derive(Debug, Clone)]
pub struct RerankOutcome {
    pub playlist: Playlist,
    pub rounds: Vec<RoundKind>,
}

/// Epsilon-greedy reranker, sampling without replacement
#[derive(Debug, Clone)]
pub struct EpsilonGreedyReranker {
    /// Probability of an exploratory round
    epsilon: f64,
    explore_pool_size: usize,
}

impl EpsilonGreedyReranker {
    pub fn new(epsilon: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(ExplorationError::InvalidEpsilon(epsilon));
        }

        Ok(Self {
            epsilon,
            explore_pool_size: DEFAULT_EXPLORE_POOL_SIZE,
        })
    }

    /// Override how many top discovery candidates an exploratory round samples from
    pub fn with_explore_pool_size(mut self, size: usize) -> Self {
        self.explore_pool_size = size.max(1);
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Score `candidates` once and select up to `k` of them
    ///
    /// The popularity target is the candidate median; `references` feed the
    /// genre rarity and long-tail statistics.
    pub fn rerank(
        &self,
        candidates: &[Candidate],
        k: usize,
        seed: u64,
        references: &ReferenceStats,
    ) -> Playlist {
        let target = median(
            &candidates
                .iter()
                .map(|c| c.popularity)
                .collect::<Vec<_>>(),
        );
        let scored = score_candidates(candidates, references, target);
        let mut rng = SelectionRng::seed_from_u64(seed);

        self.select(&scored, k, &mut rng).playlist
    }

    /// Selection over precomputed scores, consuming draws from `rng`
    ///
    /// One decision draw per round, plus one auxiliary draw per exploratory
    /// round. Stops early once the pool is exhausted.
    pub fn select(
        &self,
        scored: &[ScoredCandidate],
        k: usize,
        rng: &mut SelectionRng,
    ) -> RerankOutcome {
        let mut playlist: Playlist = Vec::with_capacity(k.min(scored.len()));
        let mut rounds = Vec::with_capacity(k.min(scored.len()));
        let mut used: HashSet<&str> = HashSet::new();

        for round in 0..k {
            let remaining: Vec<usize> = (0..scored.len())
                .filter(|&i| !used.contains(scored[i].candidate.id.as_str()))
                .collect();
            if remaining.is_empty() {
                break;
            }

            let kind = if rng.next_uniform() < self.epsilon {
                RoundKind::Explore
            } else {
                RoundKind::Exploit
            };

            let pick = match kind {
                RoundKind::Explore => self.explore(scored, &remaining, rng),
                RoundKind::Exploit => Self::exploit(scored, &remaining),
            };

            let chosen = &scored[pick];
            debug!(
                round = round + 1,
                kind = ?kind,
                id = %chosen.candidate.id,
                relevance = chosen.candidate.relevance_score,
                discovery = chosen.discovery_score,
                "Rerank round"
            );

            used.insert(chosen.candidate.id.as_str());
            playlist.push(chosen.clone());
            rounds.push(kind);
        }

        info!(
            epsilon = self.epsilon,
            requested = k,
            pool_size = scored.len(),
            selected = playlist.len(),
            explore_rounds = rounds.iter().filter(|r| **r == RoundKind::Explore).count(),
            "Epsilon-greedy rerank completed"
        );

        RerankOutcome { playlist, rounds }
    }

    /// Uniform pick among the top discovery candidates still unused
    fn explore(
        &self,
        scored: &[ScoredCandidate],
        remaining: &[usize],
        rng: &mut SelectionRng,
    ) -> usize {
        let mut pool = remaining.to_vec();
        pool.sort_by(|&a, &b| descending(scored[a].discovery_score, scored[b].discovery_score));
        pool.truncate(self.explore_pool_size);

        let aux_seed = rng.next_aux_seed();
        pool[pick_index(aux_seed, pool.len())]
    }

    /// Highest relevance among the unused candidates; first in input order on ties
    ///
    /// Uses the same ordering as the baseline sort, so NaN compares equal.
    fn exploit(scored: &[ScoredCandidate], remaining: &[usize]) -> usize {
        let mut best = remaining[0];
        for &i in &remaining[1..] {
            let ord = descending(
                scored[i].candidate.relevance_score,
                scored[best].candidate.relevance_score,
            );
            if ord == Ordering::Less {
                best = i;
            }
        }
        best
    }
}
