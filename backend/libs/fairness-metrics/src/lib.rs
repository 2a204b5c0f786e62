//! Fairness and diversity metrics for ranked lists
//!
//! Pure functions used to audit any produced playlist:
//! - **Gini**: inequality of the popularity values in a list
//! - **Shannon entropy**: spread of a list over categories (base 2)
//! - **Long-tail exposure**: rank-discounted share of list weight held by
//!   items at or below a catalog popularity percentile
//!
//! # Example
//!
//! ```rust
//! use fairness_metrics::{evaluate_playlist, DEFAULT_THRESHOLD_PERCENTILE};
//!
//! let catalog = vec![10.0, 20.0, 30.0, 40.0, 50.0];
//! let metrics = evaluate_playlist(
//!     &[10.0, 50.0],
//!     &["rock", "jazz"],
//!     &catalog,
//!     DEFAULT_THRESHOLD_PERCENTILE,
//! );
//! assert!(metrics.long_tail_exposure > 0.5);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Added inside log2 so empty buckets never hit log(0)
pub const LOG_EPSILON: f64 = 1e-12;

/// Percentile of the catalog popularity below which an item counts as tail
pub const DEFAULT_THRESHOLD_PERCENTILE: f64 = 30.0;

/// Metrics computed over one playlist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairnessMetrics {
    pub gini_popularity: f64,
    pub entropy_genre: f64,
    pub long_tail_exposure: f64,
}

/// Population Gini coefficient of the non-negative entries of `values`
///
/// Negative (and NaN) entries are discarded. Returns 0.0 for an empty or
/// all-zero input.
pub fn gini(values: &[f64]) -> f64 {
    let mut x: Vec<f64> = values.iter().copied().filter(|v| *v >= 0.0).collect();
    if x.is_empty() || x.iter().all(|v| *v == 0.0) {
        return 0.0;
    }

    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = x.len() as f64;
    let mut running = 0.0;
    let mut cumulative_sum = 0.0;
    for v in &x {
        running += v;
        cumulative_sum += running;
    }

    // running now holds C_n, the total
    (n + 1.0 - 2.0 * cumulative_sum / running) / n
}

/// Shannon entropy (bits) of the empirical distribution of `categories`
pub fn shannon_entropy<T: Hash + Eq>(categories: &[T]) -> f64 {
    if categories.is_empty() {
        return 0.0;
    }

    // Counts kept in first-seen order so the float sum is reproducible
    let mut index: HashMap<&T, usize> = HashMap::new();
    let mut counts: Vec<usize> = Vec::new();
    for category in categories {
        let slot = *index.entry(category).or_insert_with(|| {
            counts.push(0);
            counts.len() - 1
        });
        counts[slot] += 1;
    }

    let total = categories.len() as f64;
    -counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * (p + LOG_EPSILON).log2()
        })
        .sum::<f64>()
}

/// `p`-th percentile (0..=100) of `values`, linear interpolation between
/// the two closest ranks. NaNs are ignored; `None` when nothing remains.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Rank-discounted share of a list held by long-tail items
///
/// `playlist_popularity` must be in output order (rank 1 first). Position
/// `r` weighs `1 / log2(r + 1)`; it counts as tail when its popularity is at
/// or below the `threshold_percentile` of `catalog_popularity`.
pub fn long_tail_exposure(
    playlist_popularity: &[f64],
    catalog_popularity: &[f64],
    threshold_percentile: f64,
) -> f64 {
    if playlist_popularity.is_empty() || catalog_popularity.is_empty() {
        return 0.0;
    }

    let thresh = match percentile(catalog_popularity, threshold_percentile) {
        Some(t) => t,
        None => return 0.0,
    };

    let mut tail_weight = 0.0;
    let mut total_weight = 0.0;
    for (i, popularity) in playlist_popularity.iter().enumerate() {
        let rank = (i + 1) as f64;
        let weight = 1.0 / (rank + 1.0).log2();
        total_weight += weight;
        if *popularity <= thresh {
            tail_weight += weight;
        }
    }

    debug!(
        thresh = thresh,
        tail_weight = tail_weight,
        total_weight = total_weight,
        "Long-tail exposure computed"
    );

    tail_weight / (total_weight + LOG_EPSILON)
}

/// Score one playlist against the catalog popularity reference
///
/// `popularity` and `genres` are the playlist's columns in output order.
pub fn evaluate_playlist<T: Hash + Eq>(
    popularity: &[f64],
    genres: &[T],
    catalog_popularity: &[f64],
    threshold_percentile: f64,
) -> FairnessMetrics {
    FairnessMetrics {
        gini_popularity: gini(popularity),
        entropy_genre: shannon_entropy(genres),
        long_tail_exposure: long_tail_exposure(
            popularity,
            catalog_popularity,
            threshold_percentile,
        ),
    }
}
