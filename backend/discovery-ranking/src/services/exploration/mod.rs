// ============================================
// Exploration Module
// ============================================
//
// Epsilon-greedy reranking of a candidate set:
// 1. Discovery scores are computed once for the whole candidate set
// 2. Each round draws one uniform value; below epsilon it explores
// 3. Explore: uniform pick among the top discovery candidates still unused
//    (one extra draw seeds the pick)
// 4. Exploit: highest relevance candidate still unused
// 5. The pick is marked used; selection narrows the pool, never the scores
//
// Draw order is fixed (decision draw, then optional auxiliary draw), so the
// same (candidates, k, epsilon, seed, references) always yields the same list.

pub mod epsilon_greedy;
pub mod rng;

pub use epsilon_greedy::{
    EpsilonGreedyReranker, RerankOutcome, RoundKind, DEFAULT_EXPLORE_POOL_SIZE,
};
pub use rng::SelectionRng;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorationError {
    #[error("Exploration rate must be within [0, 1], got {0}")]
    InvalidEpsilon(f64),
}

pub type Result<T> = std::result::Result<T, ExplorationError>;
