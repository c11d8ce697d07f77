//! Multi-timeframe strategy classification.
//!
//! The label is a pure function of the daily and four-hour verdicts. Score
//! magnitudes never pick the label; they only feed the combined ranking
//! power.

use crate::scoring::{ScoreResult, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine strategy labels a (daily, four-hour) verdict pair maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyLabel {
    BullishContinuation,
    BearishContinuation,
    BullishReversal,
    BearishReversal,
    BullishPullback,
    BearishPullback,
    WaitForBullTrigger,
    WaitForBearTrigger,
    Ranging,
}

impl StrategyLabel {
    /// Report ranking: continuations first, then reversals, warnings, waits,
    /// and ranging markets last. Ties break on combined score.
    pub fn priority(self) -> u8 {
        match self {
            StrategyLabel::BullishContinuation | StrategyLabel::BearishContinuation => 0,
            StrategyLabel::BullishReversal | StrategyLabel::BearishReversal => 1,
            StrategyLabel::BullishPullback | StrategyLabel::BearishPullback => 2,
            StrategyLabel::WaitForBullTrigger | StrategyLabel::WaitForBearTrigger => 3,
            StrategyLabel::Ranging => 4,
        }
    }
}

impl fmt::Display for StrategyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyLabel::BullishContinuation => "A+ Bullish Continuation",
            StrategyLabel::BearishContinuation => "A+ Bearish Continuation",
            StrategyLabel::BullishReversal => "Potential Bullish Reversal",
            StrategyLabel::BearishReversal => "Potential Bearish Reversal",
            StrategyLabel::BullishPullback => "Warning: Bullish Pullback",
            StrategyLabel::BearishPullback => "Warning: Bearish Pullback",
            StrategyLabel::WaitForBullTrigger => "Wait for 4H Bull Signal",
            StrategyLabel::WaitForBearTrigger => "Wait for 4H Bear Signal",
            StrategyLabel::Ranging => "Ranging Market - Avoid",
        };
        f.write_str(s)
    }
}

/// Classify a (higher-timeframe, lower-timeframe) verdict pair.
///
/// Either bullish band on the higher timeframe selects the bullish branch
/// (likewise bearish); the reversal rows require the lower timeframe to be
/// exactly strong. The match is total over the five verdicts, so there is
/// no undefined input.
pub fn classify(higher: Verdict, lower: Verdict) -> StrategyLabel {
    if higher.is_bullish() {
        if lower.is_bullish() {
            StrategyLabel::BullishContinuation
        } else if lower.is_bearish() {
            StrategyLabel::BullishPullback
        } else {
            StrategyLabel::WaitForBullTrigger
        }
    } else if higher.is_bearish() {
        if lower.is_bearish() {
            StrategyLabel::BearishContinuation
        } else if lower.is_bullish() {
            StrategyLabel::BearishPullback
        } else {
            StrategyLabel::WaitForBearTrigger
        }
    } else {
        match lower {
            Verdict::StrongBullish => StrategyLabel::BullishReversal,
            Verdict::StrongBearish => StrategyLabel::BearishReversal,
            _ => StrategyLabel::Ranging,
        }
    }
}

/// A symbol's combined two-timeframe evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySignal {
    pub symbol: String,
    pub daily: ScoreResult,
    pub four_hour: ScoreResult,
    /// Sum of absolute momentum scores — the "power" behind the label.
    pub combined_score: i32,
    pub label: StrategyLabel,
}

impl StrategySignal {
    pub fn new(symbol: impl Into<String>, daily: ScoreResult, four_hour: ScoreResult) -> Self {
        let combined_score = daily.momentum_score.abs() + four_hour.momentum_score.abs();
        let label = classify(daily.verdict, four_hour.verdict);
        Self {
            symbol: symbol.into(),
            daily,
            four_hour,
            combined_score,
            label,
        }
    }
}
