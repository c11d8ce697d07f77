//! Property tests for the verdict mapping and the strategy layer.

use kumoscan_core::{classify, ScoreResult, StrategyLabel, StrategySignal, Timeframe, Verdict};
use proptest::prelude::*;

fn result_with(momentum: i32) -> ScoreResult {
    ScoreResult {
        symbol: "EURUSD=X".into(),
        timeframe: Timeframe::D1,
        momentum_score: momentum,
        max_score: kumoscan_core::MAX_SCORE,
        tags: vec![],
        verdict: Verdict::from_score(momentum),
    }
}

proptest! {
    /// The verdict mapping is total and matches its band definition for any
    /// integer score.
    #[test]
    fn verdict_mapping_is_total(score in -100i32..=100) {
        let verdict = Verdict::from_score(score);
        let expected = if score >= 8 {
            Verdict::StrongBullish
        } else if score >= 3 {
            Verdict::ModerateBullish
        } else if score <= -8 {
            Verdict::StrongBearish
        } else if score <= -3 {
            Verdict::ModerateBearish
        } else {
            Verdict::Neutral
        };
        prop_assert_eq!(verdict, expected);
    }

    /// Combined score is the sum of magnitudes: never negative, and
    /// unchanged when either input flips sign.
    #[test]
    fn combined_score_is_sign_symmetric(d1 in -11i32..=11, h4 in -11i32..=11) {
        let base = StrategySignal::new("X", result_with(d1), result_with(h4));
        prop_assert!(base.combined_score >= 0);
        prop_assert_eq!(base.combined_score, d1.abs() + h4.abs());

        let flipped_d1 = StrategySignal::new("X", result_with(-d1), result_with(h4));
        prop_assert_eq!(flipped_d1.combined_score, base.combined_score);

        let flipped_h4 = StrategySignal::new("X", result_with(d1), result_with(-h4));
        prop_assert_eq!(flipped_h4.combined_score, base.combined_score);
    }

    /// The label always agrees with the higher-timeframe branch that
    /// produced it.
    #[test]
    fn label_respects_higher_timeframe_direction(d1 in -11i32..=11, h4 in -11i32..=11) {
        let higher = Verdict::from_score(d1);
        let lower = Verdict::from_score(h4);
        let label = classify(higher, lower);

        if higher.is_bullish() {
            prop_assert!(matches!(
                label,
                StrategyLabel::BullishContinuation
                    | StrategyLabel::BullishPullback
                    | StrategyLabel::WaitForBullTrigger
            ));
        } else if higher.is_bearish() {
            prop_assert!(matches!(
                label,
                StrategyLabel::BearishContinuation
                    | StrategyLabel::BearishPullback
                    | StrategyLabel::WaitForBearTrigger
            ));
        } else {
            prop_assert!(matches!(
                label,
                StrategyLabel::BullishReversal
                    | StrategyLabel::BearishReversal
                    | StrategyLabel::Ranging
            ));
        }
    }
}

/// The classifier is exercised for every one of the 25 verdict pairs; the
/// decision table rows from the strategy design all hold.
#[test]
fn classifier_decision_table() {
    use StrategyLabel::*;
    use Verdict::*;

    for higher in Verdict::all() {
        for lower in Verdict::all() {
            let label = classify(higher, lower);
            let expected = match (higher, lower) {
                (StrongBullish | ModerateBullish, StrongBullish | ModerateBullish) => {
                    BullishContinuation
                }
                (StrongBullish | ModerateBullish, StrongBearish | ModerateBearish) => {
                    BullishPullback
                }
                (StrongBullish | ModerateBullish, Neutral) => WaitForBullTrigger,
                (StrongBearish | ModerateBearish, StrongBearish | ModerateBearish) => {
                    BearishContinuation
                }
                (StrongBearish | ModerateBearish, StrongBullish | ModerateBullish) => {
                    BearishPullback
                }
                (StrongBearish | ModerateBearish, Neutral) => WaitForBearTrigger,
                (Neutral, StrongBullish) => BullishReversal,
                (Neutral, StrongBearish) => BearishReversal,
                (Neutral, _) => Ranging,
            };
            assert_eq!(label, expected, "({higher:?}, {lower:?})");
        }
    }
}
