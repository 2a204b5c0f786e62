/// Ranking Module
///
/// Relevance-only ranking of a candidate set. The baseline playlist is the
/// reference every reranked list is compared against.
pub mod simple;

pub use simple::RankingLayer;
