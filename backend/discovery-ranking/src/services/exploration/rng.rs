// Seeded draw source for the reranker.
//
// Exposes exactly two operations so the draw protocol stays explicit:
// `next_uniform` for the explore/exploit decision and `next_aux_seed` for
// the auxiliary seed of an exploratory pick. One instance serves one rerank
// call and must not be shared across calls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Auxiliary seeds are drawn from [0, AUX_SEED_BOUND)
pub const AUX_SEED_BOUND: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct SelectionRng {
    rng: StdRng,
    uniform_draws: usize,
    aux_draws: usize,
}

impl SelectionRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            uniform_draws: 0,
            aux_draws: 0,
        }
    }

    /// Uniform value in [0, 1)
    pub fn next_uniform(&mut self) -> f64 {
        self.uniform_draws += 1;
        self.rng.gen::<f64>()
    }

    /// Integer in [0, AUX_SEED_BOUND)
    pub fn next_aux_seed(&mut self) -> u64 {
        self.aux_draws += 1;
        self.rng.gen_range(0..AUX_SEED_BOUND)
    }

    pub fn uniform_draws(&self) -> usize {
        self.uniform_draws
    }

    pub fn aux_draws(&self) -> usize {
        self.aux_draws
    }
}

/// Uniform index in `0..len` from a generator seeded with `aux_seed`
///
/// `len` must be non-zero.
pub fn pick_index(aux_seed: u64, len: usize) -> usize {
    StdRng::seed_from_u64(aux_seed).gen_range(0..len)
}
