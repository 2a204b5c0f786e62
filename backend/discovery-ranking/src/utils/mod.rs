// Numeric helpers shared by the ranking stages

use ndarray::ArrayView1;
use std::cmp::Ordering;

/// Additive guard for divisions by a range that may be zero
pub const RANGE_EPSILON: f64 = 1e-9;

/// Cosine similarity; 0.0 when either vector has zero norm
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Map `value` into [0, 1] against `[min, max]`, guarded by `RANGE_EPSILON`
pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
    ((value - min) / (max - min + RANGE_EPSILON)).clamp(0.0, 1.0)
}

/// Median of the non-NaN values (mean of the middle pair for even counts)
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// (min, max) of the non-NaN values
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Descending order for scores; NaN sorts as equal so stable sorts keep input order
pub fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
