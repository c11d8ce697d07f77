//! Indicator computation.
//!
//! Indicators are pure functions: candle history in, numeric series out.
//! Every output series has the same length as the input, with `f64::NAN`
//! during warmup. Frame assembly drops rows that still carry NaN in any
//! series, so downstream scoring only ever sees complete rows.
//!
//! # Look-ahead contamination guard
//! With one deliberate exception, no value at bar t may depend on price data
//! from bar t+1 or later. The exception is the chikou span, which is the
//! close displaced backward by definition — its consumers compare it against
//! history, never trade on it.

pub mod atr;
pub mod ichimoku;

pub use atr::atr;
pub use ichimoku::{ichimoku, IchimokuLines, IchimokuParams};

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHL: open = prev_close (or close for first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Candle {
                timestamp: base + Duration::days(i as i64),
                open,
                high,
                low,
                close,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
