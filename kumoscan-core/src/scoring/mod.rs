//! Confluence scoring — frame in, score plus fired-rule tags plus verdict out.

pub mod confluence;
pub mod verdict;

pub use confluence::{
    score, InsufficientData, ScoreResult, MAX_SCORE, MIN_COMPLETE_ROWS, MIN_RAW_CANDLES,
};
pub use verdict::Verdict;
