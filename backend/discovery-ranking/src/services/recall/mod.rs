// ============================================
// Recall Layer (content-based candidate generation)
// ============================================
//
// Builds a user profile from seed items and ranks the catalog by cosine
// similarity to it. Seed items never appear in the output.

mod content_recall;

pub use content_recall::{build_profile_vector, ContentRecall};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecallError {
    #[error("None of the {0} seed ids exist in the catalog")]
    InvalidSeed(usize),
}

pub type Result<T> = std::result::Result<T, RecallError>;
