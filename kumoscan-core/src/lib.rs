//! Kumoscan Core — domain types, indicators, scorer, classifier, provider
//! boundary.
//!
//! This crate contains the heart of the scanner:
//! - Domain types (candles, timeframes, indicator frames)
//! - Ichimoku line set and ATR computation with NaN warmup
//! - Confluence scorer: frame → momentum score, fired-rule tags, verdict
//! - Strategy classifier: daily + four-hour verdicts → one strategy label
//! - Data provider trait with the Yahoo Finance implementation

pub mod data;
pub mod domain;
pub mod frame;
pub mod indicators;
pub mod scoring;
pub mod strategy;

pub use domain::{Candle, Timeframe};
pub use frame::{FrameRow, IndicatorFrame};
pub use scoring::{score, InsufficientData, ScoreResult, Verdict, MAX_SCORE};
pub use strategy::{classify, StrategyLabel, StrategySignal};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the runner shares across rayon workers
    /// is Send + Sync. If any type fails this check, the build breaks
    /// immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<Candle>();
        require_sync::<Candle>();
        require_send::<Timeframe>();
        require_sync::<Timeframe>();
        require_send::<FrameRow>();
        require_sync::<FrameRow>();
        require_send::<IndicatorFrame>();
        require_sync::<IndicatorFrame>();

        // Evaluation outcomes
        require_send::<ScoreResult>();
        require_sync::<ScoreResult>();
        require_send::<Verdict>();
        require_sync::<Verdict>();
        require_send::<InsufficientData>();
        require_sync::<InsufficientData>();
        require_send::<StrategyLabel>();
        require_sync::<StrategyLabel>();
        require_send::<StrategySignal>();
        require_sync::<StrategySignal>();

        // Data boundary
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
    }

    /// Architecture contract: the scorer takes a frame and nothing else.
    ///
    /// `score()` cannot see provider state, other symbols, or wall-clock
    /// time — the signature enforces that every evaluation is a pure
    /// function of its own frame. This test documents the contract and
    /// breaks loudly if the signature ever grows extra inputs.
    #[test]
    fn scorer_is_a_pure_function_of_the_frame() {
        fn _check(frame: &IndicatorFrame) -> Result<ScoreResult, InsufficientData> {
            score(frame)
        }
    }
}
