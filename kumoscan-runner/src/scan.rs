//! Scan orchestration — evaluate every symbol, skip the ones that fail.
//!
//! Each (symbol, timeframe) evaluation is independent, so the batch fans
//! out across a rayon pool. A fetch failure or an insufficient-data outcome
//! drops the symbol from the report; nothing aborts the batch.

use kumoscan_core::data::DataProvider;
use kumoscan_core::scoring::{score, ScoreResult};
use kumoscan_core::strategy::StrategySignal;
use kumoscan_core::{IndicatorFrame, Timeframe};
use rayon::prelude::*;
use tracing::{info, warn};

/// Progress callbacks for multi-symbol scans.
pub trait ScanProgress: Send + Sync {
    /// Called when a symbol's evaluation begins.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol's evaluation finishes; `scored` is false when
    /// the symbol was skipped.
    fn on_complete(&self, symbol: &str, scored: bool);

    /// Called once the whole batch is done.
    fn on_batch_complete(&self, scored: usize, skipped: usize, total: usize);
}

/// Progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ScanProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Scanning {symbol}...", index + 1, total);
    }

    fn on_complete(&self, symbol: &str, scored: bool) {
        if !scored {
            println!("  SKIP: {symbol}");
        }
    }

    fn on_batch_complete(&self, scored: usize, skipped: usize, total: usize) {
        println!("\nScan complete: {scored}/{total} scored, {skipped} skipped");
    }
}

/// Progress reporter that stays quiet. Useful under test and when the
/// caller only wants the tracing output.
pub struct SilentProgress;

impl ScanProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _symbol: &str, _scored: bool) {}
    fn on_batch_complete(&self, _scored: usize, _skipped: usize, _total: usize) {}
}

/// Counts for one scan batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub scored: usize,
    pub skipped: usize,
}

/// Fetch and score one symbol on one timeframe. Failures become `None`.
fn evaluate_symbol(
    provider: &dyn DataProvider,
    symbol: &str,
    timeframe: Timeframe,
    lookback_days: u32,
) -> Option<ScoreResult> {
    let candles = match provider.fetch(symbol, timeframe, lookback_days) {
        Ok(candles) => candles,
        Err(e) => {
            warn!(symbol, timeframe = %timeframe, error = %e, "fetch failed, skipping");
            return None;
        }
    };

    let frame = IndicatorFrame::build(symbol, timeframe, &candles);
    match score(&frame) {
        Ok(result) => Some(result),
        Err(e) => {
            warn!(symbol, timeframe = %timeframe, %e, "skipping");
            None
        }
    }
}

/// Score every symbol on a single timeframe.
///
/// Results come back in the input symbol order; ranking happens at the
/// reporting stage.
pub fn scan_momentum(
    provider: &dyn DataProvider,
    symbols: &[String],
    timeframe: Timeframe,
    lookback_days: Option<u32>,
    progress: &dyn ScanProgress,
) -> (Vec<ScoreResult>, ScanSummary) {
    let lookback = lookback_days.unwrap_or_else(|| timeframe.default_lookback_days());
    let total = symbols.len();
    info!(total, timeframe = %timeframe, lookback, "starting momentum scan");

    let results: Vec<Option<ScoreResult>> = symbols
        .par_iter()
        .enumerate()
        .map(|(i, symbol)| {
            progress.on_start(symbol, i, total);
            let result = evaluate_symbol(provider, symbol, timeframe, lookback);
            progress.on_complete(symbol, result.is_some());
            result
        })
        .collect();

    let scored: Vec<ScoreResult> = results.into_iter().flatten().collect();
    let summary = ScanSummary {
        total,
        scored: scored.len(),
        skipped: total - scored.len(),
    };
    progress.on_batch_complete(summary.scored, summary.skipped, summary.total);
    info!(scored = summary.scored, skipped = summary.skipped, "momentum scan finished");

    (scored, summary)
}

/// Evaluate every symbol on the daily and four-hour timeframes and combine
/// the verdict pair into a strategy signal.
///
/// A symbol appears only when both timeframes score; a skip on either side
/// drops it.
pub fn scan_strategy(
    provider: &dyn DataProvider,
    symbols: &[String],
    lookback_days: Option<u32>,
    progress: &dyn ScanProgress,
) -> (Vec<StrategySignal>, ScanSummary) {
    let total = symbols.len();
    info!(total, "starting multi-timeframe strategy scan");

    let results: Vec<Option<StrategySignal>> = symbols
        .par_iter()
        .enumerate()
        .map(|(i, symbol)| {
            progress.on_start(symbol, i, total);
            let daily = evaluate_symbol(
                provider,
                symbol,
                Timeframe::D1,
                lookback_days.unwrap_or_else(|| Timeframe::D1.default_lookback_days()),
            );
            let four_hour = evaluate_symbol(
                provider,
                symbol,
                Timeframe::H4,
                lookback_days.unwrap_or_else(|| Timeframe::H4.default_lookback_days()),
            );
            let signal = match (daily, four_hour) {
                (Some(d1), Some(h4)) => Some(StrategySignal::new(symbol.clone(), d1, h4)),
                _ => None,
            };
            progress.on_complete(symbol, signal.is_some());
            signal
        })
        .collect();

    let signals: Vec<StrategySignal> = results.into_iter().flatten().collect();
    let summary = ScanSummary {
        total,
        scored: signals.len(),
        skipped: total - signals.len(),
    };
    progress.on_batch_complete(summary.scored, summary.skipped, summary.total);
    info!(scored = summary.scored, skipped = summary.skipped, "strategy scan finished");

    (signals, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use kumoscan_core::data::DataError;
    use kumoscan_core::Candle;

    /// Provider serving a fixed trend per symbol; unknown symbols fail.
    struct FixtureProvider;

    fn trend_candles(n: usize, start: f64, step: f64) -> Vec<Candle> {
        let base = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let close = start + i as f64 * step;
                let open = if i == 0 { close } else { close - step };
                Candle {
                    timestamp: base + Duration::days(i as i64),
                    open,
                    high: open.max(close) + 1.0,
                    low: open.min(close) - 1.0,
                    close,
                }
            })
            .collect()
    }

    impl DataProvider for FixtureProvider {
        fn name(&self) -> &str {
            "fixture"
        }

        fn fetch(
            &self,
            symbol: &str,
            _timeframe: Timeframe,
            _lookback_days: u32,
        ) -> Result<Vec<Candle>, DataError> {
            match symbol {
                "UP" => Ok(trend_candles(250, 100.0, 0.5)),
                "DOWN" => Ok(trend_candles(250, 300.0, -0.5)),
                "SHORT" => Ok(trend_candles(40, 100.0, 0.5)),
                _ => Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                }),
            }
        }
    }

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn momentum_scan_skips_failures_and_continues() {
        let (results, summary) = scan_momentum(
            &FixtureProvider,
            &symbols(&["UP", "MISSING", "SHORT", "DOWN"]),
            Timeframe::D1,
            None,
            &SilentProgress,
        );

        assert_eq!(summary, ScanSummary { total: 4, scored: 2, skipped: 2 });
        let scanned: Vec<&str> = results.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(scanned, vec!["UP", "DOWN"]);
        assert!(results[0].momentum_score > 0);
        assert!(results[1].momentum_score < 0);
    }

    #[test]
    fn strategy_scan_requires_both_timeframes() {
        let (signals, summary) = scan_strategy(
            &FixtureProvider,
            &symbols(&["UP", "MISSING"]),
            None,
            &SilentProgress,
        );

        assert_eq!(summary.scored, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(signals[0].symbol, "UP");
        assert_eq!(
            signals[0].combined_score,
            signals[0].daily.momentum_score.abs() + signals[0].four_hour.momentum_score.abs()
        );
    }

    #[test]
    fn empty_universe_is_an_empty_batch() {
        let (results, summary) = scan_momentum(
            &FixtureProvider,
            &[],
            Timeframe::H4,
            None,
            &SilentProgress,
        );
        assert!(results.is_empty());
        assert_eq!(summary, ScanSummary { total: 0, scored: 0, skipped: 0 });
    }
}
