use super::{RecallError, Result};
use crate::models::{Candidate, Catalog};
use crate::services::features::FeatureMatrix;
use crate::utils::{cosine_similarity, descending};
use ndarray::Array1;
use std::collections::HashSet;
use tracing::{debug, info};

/// Mean standardized vector of the catalog rows whose id is in `seed_ids`
///
/// Returns the profile together with a per-row seed mask.
pub fn build_profile_vector<S: AsRef<str>>(
    catalog: &Catalog,
    features: &FeatureMatrix,
    seed_ids: &[S],
) -> Result<(Array1<f64>, Vec<bool>)> {
    let seeds: HashSet<&str> = seed_ids.iter().map(|s| s.as_ref()).collect();
    let seed_mask: Vec<bool> = catalog
        .items()
        .iter()
        .map(|item| seeds.contains(item.id.as_str()))
        .collect();

    let seed_rows: Vec<usize> = seed_mask
        .iter()
        .enumerate()
        .filter_map(|(i, is_seed)| is_seed.then_some(i))
        .collect();

    if seed_rows.is_empty() {
        return Err(RecallError::InvalidSeed(seeds.len()));
    }

    let mut profile = Array1::<f64>::zeros(features.view().ncols());
    for &i in &seed_rows {
        profile += &features.row(i);
    }
    profile /= seed_rows.len() as f64;

    debug!(
        seed_ids = seeds.len(),
        matched = seed_rows.len(),
        "User profile built from seed items"
    );

    Ok((profile, seed_mask))
}

/// Content-based recall over an in-memory catalog
pub struct ContentRecall<'a> {
    catalog: &'a Catalog,
    features: &'a FeatureMatrix,
}

impl<'a> ContentRecall<'a> {
    pub fn new(catalog: &'a Catalog, features: &'a FeatureMatrix) -> Self {
        Self { catalog, features }
    }

    /// Top `top_n` non-seed items by similarity to the seed profile
    ///
    /// Ties keep catalog order. Fails with `InvalidSeed` when no seed id
    /// matches the catalog.
    pub fn recall_candidates<S: AsRef<str>>(
        &self,
        seed_ids: &[S],
        top_n: usize,
    ) -> Result<Vec<Candidate>> {
        let (profile, seed_mask) = build_profile_vector(self.catalog, self.features, seed_ids)?;

        // Seeds are pinned below any attainable similarity, then dropped
        let mut scored: Vec<(usize, f64)> = (0..self.catalog.len())
            .map(|i| {
                let sim = if seed_mask[i] {
                    f64::NEG_INFINITY
                } else {
                    cosine_similarity(profile.view(), self.features.row(i))
                };
                (i, sim)
            })
            .collect();

        scored.sort_by(|a, b| descending(a.1, b.1));

        let candidates: Vec<Candidate> = scored
            .into_iter()
            .filter(|(i, _)| !seed_mask[*i])
            .take(top_n)
            .map(|(i, sim)| Candidate::from_item(&self.catalog.items()[i], sim))
            .collect();

        info!(
            catalog_size = self.catalog.len(),
            top_n = top_n,
            candidates = candidates.len(),
            "Content recall completed"
        );

        Ok(candidates)
    }
}
