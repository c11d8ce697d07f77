//! Report export — CSV and JSON renderings of ranked scan results.
//!
//! Rows come out in report order (ranked), so a spreadsheet open lands on
//! the same view the text tables print.

use anyhow::{Context, Result};
use kumoscan_core::{ScoreResult, StrategySignal};

use crate::report::{display_symbol, rank_momentum, rank_signals};

/// Export ranked momentum results as CSV.
///
/// Columns: pair, timeframe, score, max_score, verdict, confluences
pub fn export_momentum_csv(results: &[ScoreResult]) -> Result<String> {
    let ranked = rank_momentum(results);
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["pair", "timeframe", "score", "max_score", "verdict", "confluences"])?;

    for r in ranked
        .bullish
        .iter()
        .chain(ranked.bearish.iter())
        .chain(ranked.neutral.iter())
    {
        let score = r.momentum_score.to_string();
        let max_score = r.max_score.to_string();
        let verdict = r.verdict.to_string();
        let tags = r.tags.join(", ");
        wtr.write_record([
            display_symbol(&r.symbol),
            r.timeframe.interval(),
            score.as_str(),
            max_score.as_str(),
            verdict.as_str(),
            tags.as_str(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export ranked strategy signals as CSV.
///
/// Columns: pair, combined_score, d1_verdict, d1_score, h4_verdict,
/// h4_score, strategy
pub fn export_strategy_csv(signals: &[StrategySignal]) -> Result<String> {
    let ranked = rank_signals(signals);
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "pair",
        "combined_score",
        "d1_verdict",
        "d1_score",
        "h4_verdict",
        "h4_score",
        "strategy",
    ])?;

    for s in &ranked {
        let combined = s.combined_score.to_string();
        let d1_verdict = s.daily.verdict.to_string();
        let d1_score = s.daily.momentum_score.to_string();
        let h4_verdict = s.four_hour.verdict.to_string();
        let h4_score = s.four_hour.momentum_score.to_string();
        let strategy = s.label.to_string();
        wtr.write_record([
            display_symbol(&s.symbol),
            combined.as_str(),
            d1_verdict.as_str(),
            d1_score.as_str(),
            h4_verdict.as_str(),
            h4_score.as_str(),
            strategy.as_str(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Serialize ranked momentum results to pretty JSON.
pub fn export_momentum_json(results: &[ScoreResult]) -> Result<String> {
    let ranked = rank_momentum(results);
    let ordered: Vec<&ScoreResult> = ranked
        .bullish
        .iter()
        .chain(ranked.bearish.iter())
        .chain(ranked.neutral.iter())
        .collect();
    serde_json::to_string_pretty(&ordered).context("failed to serialize momentum results to JSON")
}

/// Serialize ranked strategy signals to pretty JSON.
pub fn export_strategy_json(signals: &[StrategySignal]) -> Result<String> {
    let ranked = rank_signals(signals);
    serde_json::to_string_pretty(&ranked).context("failed to serialize strategy signals to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kumoscan_core::{Timeframe, Verdict, MAX_SCORE};

    fn result(symbol: &str, momentum: i32) -> ScoreResult {
        ScoreResult {
            symbol: symbol.into(),
            timeframe: Timeframe::D1,
            momentum_score: momentum,
            max_score: MAX_SCORE,
            tags: vec!["Price > Kumo".into(), "TK Cross Bullish".into()],
            verdict: Verdict::from_score(momentum),
        }
    }

    fn signal(symbol: &str, d1: i32, h4: i32) -> StrategySignal {
        StrategySignal::new(symbol, result(symbol, d1), result(symbol, h4))
    }

    #[test]
    fn momentum_csv_has_header_and_ranked_rows() {
        let results = vec![result("A=X", 3), result("B=X", 8)];
        let csv = export_momentum_csv(&results).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "pair,timeframe,score,max_score,verdict,confluences"
        );
        // Ranked: B (8) before A (3).
        assert!(lines[1].starts_with("B,"));
        assert!(lines[2].starts_with("A,"));
        assert!(lines[1].contains("Strong Bullish"));
    }

    #[test]
    fn momentum_csv_quotes_tag_list() {
        let csv = export_momentum_csv(&[result("A=X", 5)]).unwrap();
        // The comma-joined tag list is one quoted field.
        assert!(csv.contains("\"Price > Kumo, TK Cross Bullish\""));
    }

    #[test]
    fn empty_momentum_csv_is_header_only() {
        let csv = export_momentum_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn strategy_csv_rows_follow_ranking() {
        let signals = vec![signal("WAIT=X", 5, 0), signal("APLUS=X", 6, 4)];
        let csv = export_strategy_csv(&signals).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("APLUS,"));
        assert!(lines[1].contains("A+ Bullish Continuation"));
        assert!(lines[2].contains("Wait for 4H Bull Signal"));
    }

    #[test]
    fn momentum_json_roundtrips() {
        let results = vec![result("A=X", 3), result("B=X", -4)];
        let json = export_momentum_json(&results).unwrap();
        let restored: Vec<ScoreResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].symbol, "A=X");
        assert_eq!(restored[1].verdict, Verdict::ModerateBearish);
    }

    #[test]
    fn strategy_json_roundtrips() {
        let signals = vec![signal("EURUSD=X", 8, 6)];
        let json = export_strategy_json(&signals).unwrap();
        let restored: Vec<StrategySignal> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored[0].combined_score, 14);
    }
}
