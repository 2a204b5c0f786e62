pub mod discovery;
pub mod evaluation;
pub mod exploration;
pub mod features;
pub mod ranking;
pub mod recall;

pub use exploration::EpsilonGreedyReranker;
pub use features::FeatureVectorizer;
pub use ranking::RankingLayer;
pub use recall::ContentRecall;
