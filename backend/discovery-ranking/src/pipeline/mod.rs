use crate::config::{Config, ConfigError};
use crate::models::{Candidate, Catalog, Playlist, ReferenceStats};
use crate::services::evaluation::{epsilon_sweep, evaluate_playlist, SweepPoint, SweepRequest};
use crate::services::exploration::{EpsilonGreedyReranker, ExplorationError};
use crate::services::features::{FeatureMatrix, FeatureVectorizer};
use crate::services::recall::{ContentRecall, RecallError};
use crate::services::RankingLayer;
use fairness_metrics::FairnessMetrics;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Recall failed: {0}")]
    Recall(#[from] RecallError),

    #[error("Rerank failed: {0}")]
    Exploration(#[from] ExplorationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Baseline vs reranked comparison for one request, plus the epsilon sweep
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub candidate_count: usize,
    pub baseline: Vec<Candidate>,
    pub reranked: Playlist,
    pub baseline_metrics: FairnessMetrics,
    pub reranked_metrics: FairnessMetrics,
    pub sweep: Vec<SweepPoint>,
}

/// Recall -> Baseline -> Rerank -> Evaluate, over one in-memory catalog
///
/// Standardization statistics are fitted once when the pipeline is built.
pub struct DiscoveryPipeline {
    catalog: Catalog,
    features: FeatureMatrix,
    ranking_layer: RankingLayer,
}

impl DiscoveryPipeline {
    pub fn new(catalog: Catalog) -> Self {
        let features = FeatureVectorizer::standardize(&catalog);
        Self {
            catalog,
            features,
            ranking_layer: RankingLayer::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Scorer references for the chosen mode
    pub fn references(&self, use_catalog_reference: bool) -> ReferenceStats {
        if use_catalog_reference {
            ReferenceStats::from_catalog(&self.catalog)
        } else {
            ReferenceStats::candidate_local()
        }
    }

    pub fn recall<S: AsRef<str>>(&self, seed_ids: &[S], top_n: usize) -> Result<Vec<Candidate>> {
        let recall = ContentRecall::new(&self.catalog, &self.features);
        Ok(recall.recall_candidates(seed_ids, top_n)?)
    }

    /// Run one full request described by `config`
    pub fn audit(&self, config: &Config) -> Result<AuditReport> {
        config.validate()?;

        let candidates = self.recall(&config.seed_ids, config.top_n)?;
        let references = self.references(config.use_catalog_reference);
        let catalog_popularity = self.catalog.popularity_reference();

        let baseline = self
            .ranking_layer
            .baseline_playlist(&candidates, config.k);
        let reranked = EpsilonGreedyReranker::new(config.epsilon)?.rerank(
            &candidates,
            config.k,
            config.seed,
            &references,
        );

        let baseline_metrics =
            evaluate_playlist(&baseline, &catalog_popularity, config.threshold_percentile);
        let reranked_metrics =
            evaluate_playlist(&reranked, &catalog_popularity, config.threshold_percentile);

        let sweep = epsilon_sweep(
            &SweepRequest {
                candidates: &candidates,
                k: config.k,
                seed: config.seed,
                references: &references,
                catalog_popularity: &catalog_popularity,
                threshold_percentile: config.threshold_percentile,
            },
            &config.sweep_epsilons,
        )?;

        info!(
            candidates = candidates.len(),
            baseline_gini = baseline_metrics.gini_popularity,
            reranked_gini = reranked_metrics.gini_popularity,
            baseline_entropy = baseline_metrics.entropy_genre,
            reranked_entropy = reranked_metrics.entropy_genre,
            "Discovery audit completed"
        );

        Ok(AuditReport {
            candidate_count: candidates.len(),
            baseline,
            reranked,
            baseline_metrics,
            reranked_metrics,
            sweep,
        })
    }
}
