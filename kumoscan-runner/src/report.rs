//! Ranked report rendering — the momentum and strategy text tables.
//!
//! Ranking lives here, not in the classifier: continuations outrank
//! reversals, which outrank warnings, waits, and ranging markets; ties
//! break on combined power. Momentum tables sort bullish scores downward
//! and bearish scores upward so the strongest setups top both lists.

use kumoscan_core::{ScoreResult, StrategySignal};
use std::cmp::Reverse;

/// Strip the provider suffix for display ("EURUSD=X" → "EURUSD").
pub fn display_symbol(symbol: &str) -> &str {
    symbol.strip_suffix("=X").unwrap_or(symbol)
}

/// Momentum results split into report categories.
#[derive(Debug, Clone)]
pub struct RankedMomentum {
    /// Strong + moderate bullish, strongest first.
    pub bullish: Vec<ScoreResult>,
    /// Strong + moderate bearish, most negative first.
    pub bearish: Vec<ScoreResult>,
    /// Neutral verdicts, input order.
    pub neutral: Vec<ScoreResult>,
}

/// Split and sort momentum results into their report categories.
pub fn rank_momentum(results: &[ScoreResult]) -> RankedMomentum {
    let mut bullish: Vec<ScoreResult> = results
        .iter()
        .filter(|r| r.verdict.is_bullish())
        .cloned()
        .collect();
    bullish.sort_by_key(|r| Reverse(r.momentum_score));

    let mut bearish: Vec<ScoreResult> = results
        .iter()
        .filter(|r| r.verdict.is_bearish())
        .cloned()
        .collect();
    bearish.sort_by_key(|r| r.momentum_score);

    let neutral: Vec<ScoreResult> = results
        .iter()
        .filter(|r| !r.verdict.is_bullish() && !r.verdict.is_bearish())
        .cloned()
        .collect();

    RankedMomentum {
        bullish,
        bearish,
        neutral,
    }
}

/// Sort strategy signals by label priority, then by descending combined
/// power.
pub fn rank_signals(signals: &[StrategySignal]) -> Vec<StrategySignal> {
    let mut sorted = signals.to_vec();
    sorted.sort_by_key(|s| (s.label.priority(), Reverse(s.combined_score)));
    sorted
}

fn banner(title: &str) -> String {
    let rail = "=".repeat(30);
    format!("\n{rail} {title} {rail}\n")
}

fn momentum_section(title: &str, rows: &[ScoreResult]) -> String {
    let mut out = banner(title);
    if rows.is_empty() {
        out.push_str("No pairs match this category.\n");
        return out;
    }

    out.push_str(&format!(
        "| {:<10} | {:<8} | {:<18} | {:<75} |\n",
        "Pair", "Score", "Verdict", "Key Confluences"
    ));
    out.push_str(&format!(
        "|{}|{}|{}|{}|\n",
        "-".repeat(12),
        "-".repeat(10),
        "-".repeat(20),
        "-".repeat(77)
    ));
    for r in rows {
        out.push_str(&format!(
            "| {:<10} | {:<8} | {:<18} | {:<75} |\n",
            display_symbol(&r.symbol),
            r.score_display(),
            r.verdict.to_string(),
            r.tags.join(", ")
        ));
    }
    out
}

/// Render the full single-timeframe momentum report.
pub fn momentum_report(results: &[ScoreResult]) -> String {
    let ranked = rank_momentum(results);
    let mut out = String::new();
    out.push_str(&momentum_section("BULLISH MOMENTUM PAIRS", &ranked.bullish));
    out.push_str(&momentum_section("BEARISH MOMENTUM PAIRS", &ranked.bearish));
    out.push_str(&momentum_section("NEUTRAL / RANGING PAIRS", &ranked.neutral));
    out
}

/// Render the ranked multi-timeframe strategy report.
pub fn strategy_report(signals: &[StrategySignal]) -> String {
    let mut out = banner("MULTI-TIMEFRAME STRATEGY REPORT");
    let ranked = rank_signals(signals);
    if ranked.is_empty() {
        out.push_str("No pairs produced a signal.\n");
        return out;
    }

    out.push_str(&format!(
        "| {:<10} | {:<10} | {:<18} | {:<10} | {:<18} | {:<10} | {:<28} |\n",
        "Pair", "Combined", "1D Verdict", "1D Score", "4H Verdict", "4H Score", "Strategy Signal"
    ));
    out.push_str(&format!(
        "|{}|{}|{}|{}|{}|{}|{}|\n",
        "-".repeat(12),
        "-".repeat(12),
        "-".repeat(20),
        "-".repeat(12),
        "-".repeat(20),
        "-".repeat(12),
        "-".repeat(30)
    ));
    for s in &ranked {
        out.push_str(&format!(
            "| {:<10} | {:<10} | {:<18} | {:<10} | {:<18} | {:<10} | {:<28} |\n",
            display_symbol(&s.symbol),
            s.combined_score,
            s.daily.verdict.to_string(),
            s.daily.momentum_score,
            s.four_hour.verdict.to_string(),
            s.four_hour.momentum_score,
            s.label.to_string()
        ));
    }
    out
}
