//! The confluence scorer.
//!
//! Seven rules run in a fixed order against the most recent complete row.
//! The thick-kumo amplifier reads the running score of the rules before it,
//! so the order is part of the contract, as is the bounce priority
//! (bullish kijun, bullish kumo, bearish kijun, bearish kumo — first match
//! wins).

use crate::domain::Timeframe;
use crate::frame::{FrameRow, IndicatorFrame};
use crate::scoring::Verdict;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed ceiling used for score display ("7/11"). A label carried from the
/// original rule set, not a sum of the rule weights — do not recompute it.
pub const MAX_SCORE: i32 = 11;

/// Minimum raw candles before indicator computation.
pub const MIN_RAW_CANDLES: usize = 52;

/// Minimum complete rows after warmup filtering.
pub const MIN_COMPLETE_ROWS: usize = 27;

/// How many recent rows the bounce rules look back over.
const BOUNCE_LOOKBACK: usize = 5;

/// Overextension threshold, in ATR multiples beyond the cloud edge.
const OVEREXTENSION_ATR: f64 = 1.5;

/// Cloud thickness threshold, in ATR multiples.
const THICK_KUMO_ATR: f64 = 0.8;

/// The chikou span is compared against the close this many rows back.
const CHIKOU_SHIFT: usize = 26;

/// Not enough history to evaluate — the symbol is skipped, not failed.
#[derive(Debug, Clone, Error)]
#[error("insufficient data: {raw_bars} raw candles, {complete_rows} complete rows")]
pub struct InsufficientData {
    pub raw_bars: usize,
    pub complete_rows: usize,
}

/// Outcome of one (symbol, timeframe) evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub momentum_score: i32,
    pub max_score: i32,
    /// Fired-rule tags, in evaluation order.
    pub tags: Vec<String>,
    pub verdict: Verdict,
}

impl ScoreResult {
    /// "7/11" form used in report tables.
    pub fn score_display(&self) -> String {
        format!("{}/{}", self.momentum_score, self.max_score)
    }
}

/// Score a frame.
///
/// Requires at least [`MIN_RAW_CANDLES`] raw candles and
/// [`MIN_COMPLETE_ROWS`] complete rows; anything less is the
/// [`InsufficientData`] outcome and the caller skips the symbol.
pub fn score(frame: &IndicatorFrame) -> Result<ScoreResult, InsufficientData> {
    let rows = frame.rows();
    if frame.raw_len < MIN_RAW_CANDLES || rows.len() < MIN_COMPLETE_ROWS {
        return Err(InsufficientData {
            raw_bars: frame.raw_len,
            complete_rows: rows.len(),
        });
    }

    let last = &rows[rows.len() - 1];
    let mut momentum = 0i32;
    let mut tags: Vec<String> = Vec::new();

    let cloud_top = last.senkou_a.max(last.senkou_b);
    let cloud_bottom = last.senkou_a.min(last.senkou_b);

    // 1. Cloud position. In-cloud tags without scoring.
    if last.close > cloud_top {
        momentum += 2;
        tags.push("Price > Kumo".into());
    } else if last.close < cloud_bottom {
        momentum -= 2;
        tags.push("Price < Kumo".into());
    } else {
        tags.push("Price in Kumo".into());
    }

    // 2. Tenkan/kijun cross. Equality counts as bearish.
    if last.tenkan > last.kijun {
        momentum += 1;
        tags.push("TK Cross Bullish".into());
    } else {
        momentum -= 1;
        tags.push("TK Cross Bearish".into());
    }

    // 3. Chikou confirmation against the close 26 rows back (fixed row
    // count, not a timestamp match).
    let past_close = rows[rows.len() - (CHIKOU_SHIFT + 1)].close;
    if last.chikou > past_close {
        momentum += 2;
        tags.push("Chikou Confirms Bull".into());
    } else {
        momentum -= 2;
        tags.push("Chikou Confirms Bear".into());
    }

    // 4. Future cloud bias.
    if last.senkou_a > last.senkou_b {
        momentum += 1;
        tags.push("Future Kumo Bullish".into());
    } else {
        momentum -= 1;
        tags.push("Future Kumo Bearish".into());
    }

    if last.atr > 0.0 {
        // 5. Overextension beyond the cloud, in ATR multiples.
        if last.close > cloud_top && (last.close - cloud_top) / last.atr > OVEREXTENSION_ATR {
            momentum += 1;
            tags.push("Overextended Bull".into());
        } else if last.close < cloud_bottom
            && (cloud_bottom - last.close) / last.atr > OVEREXTENSION_ATR
        {
            momentum -= 1;
            tags.push("Overextended Bear".into());
        }

        // 6. Thick-kumo amplifier. Reinforces the running score only when
        // the cloud color agrees with its sign; the tag fires either way.
        if (last.senkou_a - last.senkou_b).abs() / last.atr > THICK_KUMO_ATR {
            if last.senkou_a > last.senkou_b && momentum > 0 {
                momentum += 1;
            }
            if last.senkou_a < last.senkou_b && momentum < 0 {
                momentum -= 1;
            }
            tags.push("Thick Kumo".into());
        }
    }

    // 7. Bounce event over the trailing window. At most one fires.
    let recent = &rows[rows.len() - BOUNCE_LOOKBACK.min(rows.len())..];
    if touched_kijun_from_above(recent) && last.close > last.kijun {
        momentum += 2;
        tags.push("EVENT: KIJUN BOUNCE".into());
    } else if touched_cloud_top(recent) && last.close > cloud_top {
        momentum += 2;
        tags.push("EVENT: KUMO BOUNCE".into());
    } else if touched_kijun_from_below(recent) && last.close < last.kijun {
        momentum -= 2;
        tags.push("EVENT: KIJUN BOUNCE".into());
    } else if touched_cloud_bottom(recent) && last.close < cloud_bottom {
        momentum -= 2;
        tags.push("EVENT: KUMO BOUNCE".into());
    }

    Ok(ScoreResult {
        symbol: frame.symbol.clone(),
        timeframe: frame.timeframe,
        momentum_score: momentum,
        max_score: MAX_SCORE,
        tags,
        verdict: Verdict::from_score(momentum),
    })
}

fn touched_kijun_from_above(rows: &[FrameRow]) -> bool {
    rows.iter().any(|r| r.low <= r.kijun)
}

fn touched_kijun_from_below(rows: &[FrameRow]) -> bool {
    rows.iter().any(|r| r.high >= r.kijun)
}

fn touched_cloud_top(rows: &[FrameRow]) -> bool {
    rows.iter().any(|r| r.low <= r.senkou_a.max(r.senkou_b))
}

fn touched_cloud_bottom(rows: &[FrameRow]) -> bool {
    rows.iter().any(|r| r.high >= r.senkou_a.min(r.senkou_b))
}
