//! IndicatorFrame — candles joined with their Ichimoku and ATR values.
//!
//! The builder computes every series over the raw candles, then keeps only
//! the rows where the candle and all six indicator values are present. The
//! NaN warmup rows and the chikou tail never reach the scorer.

use crate::domain::{Candle, Timeframe};
use crate::indicators::{atr, ichimoku, IchimokuParams};
use serde::{Deserialize, Serialize};

/// ATR period used for frame assembly.
pub const ATR_PERIOD: usize = 14;

/// One complete row: a candle plus its indicator values, all non-NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRow {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub tenkan: f64,
    pub kijun: f64,
    pub senkou_a: f64,
    pub senkou_b: f64,
    pub chikou: f64,
    pub atr: f64,
}

/// An annotated candle sequence for one (symbol, timeframe) evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Candle count before indicator computation and row filtering.
    pub raw_len: usize,
    rows: Vec<FrameRow>,
}

impl IndicatorFrame {
    /// Build a frame from raw candles.
    ///
    /// Candles are ordered by timestamp before computation, so the strictly
    /// increasing invariant holds regardless of provider quirks.
    pub fn build(symbol: impl Into<String>, timeframe: Timeframe, candles: &[Candle]) -> Self {
        let mut ordered: Vec<Candle> = candles.to_vec();
        ordered.sort_by_key(|c| c.timestamp);
        ordered.dedup_by_key(|c| c.timestamp);

        let lines = ichimoku(&ordered, &IchimokuParams::default());
        let atr_series = atr(&ordered, ATR_PERIOD);

        let rows = ordered
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let row = FrameRow {
                    timestamp: c.timestamp,
                    open: c.open,
                    high: c.high,
                    low: c.low,
                    close: c.close,
                    tenkan: lines.tenkan[i],
                    kijun: lines.kijun[i],
                    senkou_a: lines.senkou_a[i],
                    senkou_b: lines.senkou_b[i],
                    chikou: lines.chikou[i],
                    atr: atr_series[i],
                };
                row.is_complete().then_some(row)
            })
            .collect();

        Self {
            symbol: symbol.into(),
            timeframe,
            raw_len: candles.len(),
            rows,
        }
    }

    /// Assemble a frame from pre-computed rows.
    ///
    /// Incomplete rows are rejected the same way `build` drops them. Used by
    /// synthetic fixtures and benchmarks; provider-backed code goes through
    /// `build`.
    pub fn from_rows(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        raw_len: usize,
        rows: Vec<FrameRow>,
    ) -> Self {
        let rows = rows.into_iter().filter(FrameRow::is_complete).collect();
        Self {
            symbol: symbol.into(),
            timeframe,
            raw_len,
            rows,
        }
    }

    /// The complete rows, oldest first.
    pub fn rows(&self) -> &[FrameRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FrameRow {
    /// True when the candle and all six indicator values are present.
    pub fn is_complete(&self) -> bool {
        [
            self.open,
            self.high,
            self.low,
            self.close,
            self.tenkan,
            self.kijun,
            self.senkou_a,
            self.senkou_b,
            self.chikou,
            self.atr,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
