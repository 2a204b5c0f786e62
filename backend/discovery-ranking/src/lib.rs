//! Discovery-aware reranking of content-based recommendations.
//!
//! Pipeline: catalog features are standardized, a seed profile recalls
//! candidates by cosine similarity, each candidate gets a discovery score
//! (genre rarity, long-tail bonus, popularity balance), and a seeded
//! epsilon-greedy reranker trades relevance for discovery. Results are
//! audited with the `fairness-metrics` library.

pub mod config;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use config::Config;
pub use models::{Candidate, Catalog, Item, Playlist, ReferenceStats, ScoredCandidate};
pub use pipeline::{AuditReport, DiscoveryPipeline, PipelineError};
pub use services::{ContentRecall, EpsilonGreedyReranker, FeatureVectorizer, RankingLayer};
