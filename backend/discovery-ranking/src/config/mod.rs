use crate::services::evaluation::DEFAULT_SWEEP_EPSILONS;
use fairness_metrics::DEFAULT_THRESHOLD_PERCENTILE;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable prefix, e.g. `DISCOVERY_EPSILON=0.3`
pub const ENV_PREFIX: &str = "DISCOVERY_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Request configuration: catalog location, seeds and reranking knobs
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// JSON catalog read by the binary
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Comma-separated seed item ids
    #[serde(default)]
    pub seed_ids: Vec<String>,
    /// Candidates kept from content recall
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Playlist length
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_threshold_percentile")]
    pub threshold_percentile: f64,
    /// Score against catalog-wide statistics instead of the candidate set itself
    #[serde(default = "default_use_catalog_reference")]
    pub use_catalog_reference: bool,
    #[serde(default = "default_sweep_epsilons")]
    pub sweep_epsilons: Vec<f64>,
}

fn default_top_n() -> usize {
    100
}

fn default_k() -> usize {
    10
}

fn default_epsilon() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_threshold_percentile() -> f64 {
    DEFAULT_THRESHOLD_PERCENTILE
}

fn default_use_catalog_reference() -> bool {
    true
}

fn default_sweep_epsilons() -> Vec<f64> {
    DEFAULT_SWEEP_EPSILONS.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            seed_ids: Vec::new(),
            top_n: default_top_n(),
            k: default_k(),
            epsilon: default_epsilon(),
            seed: default_seed(),
            threshold_percentile: default_threshold_percentile(),
            use_catalog_reference: default_use_catalog_reference(),
            sweep_epsilons: default_sweep_epsilons(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and `DISCOVERY_*` variables, then validate
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: Config = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be positive".to_string()));
        }
        if self.k == 0 {
            return Err(ConfigError::Invalid("k must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be within [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(0.0..=100.0).contains(&self.threshold_percentile) {
            return Err(ConfigError::Invalid(format!(
                "threshold_percentile must be within [0, 100], got {}",
                self.threshold_percentile
            )));
        }
        if let Some(bad) = self
            .sweep_epsilons
            .iter()
            .find(|e| !(0.0..=1.0).contains(*e))
        {
            return Err(ConfigError::Invalid(format!(
                "sweep epsilon must be within [0, 1], got {}",
                bad
            )));
        }
        Ok(())
    }
}
