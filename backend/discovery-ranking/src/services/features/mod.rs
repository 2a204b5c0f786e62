// ============================================
// Feature Vectorizer
// ============================================
// Standardizes the 12 audio features of every catalog item into z-scores.
// Each column is shifted to zero mean and scaled to unit (population)
// variance over the whole catalog; a constant column becomes all zeros.

use crate::models::{Catalog, FEATURE_DIM};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::debug;

/// Standardized feature matrix, one row per catalog item in catalog order
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    matrix: Array2<f64>,
    means: Array1<f64>,
    scales: Array1<f64>,
}

impl FeatureMatrix {
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.matrix.row(index)
    }

    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Per-column catalog means
    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    /// Per-column divisors (1.0 for constant columns)
    pub fn scales(&self) -> &Array1<f64> {
        &self.scales
    }
}

pub struct FeatureVectorizer;

impl FeatureVectorizer {
    /// Fit column statistics on `catalog` and return the standardized matrix
    pub fn standardize(catalog: &Catalog) -> FeatureMatrix {
        let n = catalog.len();
        let mut raw = Array2::<f64>::zeros((n, FEATURE_DIM));
        for (mut row, item) in raw.axis_iter_mut(Axis(0)).zip(catalog.items()) {
            row.assign(&ArrayView1::from(&item.features.to_vector()[..]));
        }

        let mut means = Array1::<f64>::zeros(FEATURE_DIM);
        let mut scales = Array1::<f64>::ones(FEATURE_DIM);

        if n == 0 {
            return FeatureMatrix {
                matrix: raw,
                means,
                scales,
            };
        }

        let mut constant_columns = 0usize;
        for (j, mut column) in raw.axis_iter_mut(Axis(1)).enumerate() {
            let (lo, hi) = column
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(*v), hi.max(*v))
                });

            let mean = column.sum() / n as f64;
            means[j] = mean;

            if lo == hi {
                // zero variance: constant zero column
                column.fill(0.0);
                constant_columns += 1;
                continue;
            }

            let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
            let std = variance.sqrt();
            scales[j] = std;
            column.mapv_inplace(|v| (v - mean) / std);
        }

        debug!(
            rows = n,
            constant_columns = constant_columns,
            "Catalog features standardized"
        );

        FeatureMatrix {
            matrix: raw,
            means,
            scales,
        }
    }
}
