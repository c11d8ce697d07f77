//! Ichimoku Kinko Hyo line set.
//!
//! Midprice lines: tenkan (9), kijun (26), senkou B basis (52).
//! Senkou A and B are displaced forward by the kijun period, so the cloud
//! under the latest candle is the one projected 26 bars earlier. Chikou is
//! the close displaced backward by the same period, which leaves the last
//! 26 values of that series NaN.

use crate::domain::Candle;

/// Ichimoku periods. The 9/26/52 defaults are the classic parameterization.
#[derive(Debug, Clone, Copy)]
pub struct IchimokuParams {
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan: 9,
            kijun: 26,
            senkou: 52,
        }
    }
}

/// The five Ichimoku series, each the same length as the input candles.
#[derive(Debug, Clone)]
pub struct IchimokuLines {
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub senkou_a: Vec<f64>,
    pub senkou_b: Vec<f64>,
    pub chikou: Vec<f64>,
}

/// Rolling midprice: (highest high + lowest low) / 2 over a trailing window.
/// NaN until the window fills; NaN whenever the window contains a NaN.
pub fn rolling_midprice(candles: &[Candle], period: usize) -> Vec<f64> {
    assert!(period >= 1, "midprice period must be >= 1");
    let n = candles.len();
    let mut result = vec![f64::NAN; n];

    for i in (period - 1)..n {
        let window = &candles[(i + 1 - period)..=i];
        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;
        let mut nan_in_window = false;
        for c in window {
            if c.high.is_nan() || c.low.is_nan() {
                nan_in_window = true;
                break;
            }
            highest = highest.max(c.high);
            lowest = lowest.min(c.low);
        }
        if !nan_in_window {
            result[i] = 0.5 * (highest + lowest);
        }
    }

    result
}

/// Displace a series forward: result[i] = series[i - n], NaN head.
fn shift_forward(series: &[f64], n: usize) -> Vec<f64> {
    let len = series.len();
    let mut result = vec![f64::NAN; len];
    for i in n..len {
        result[i] = series[i - n];
    }
    result
}

/// Displace a series backward: result[i] = series[i + n], NaN tail.
fn shift_backward(series: &[f64], n: usize) -> Vec<f64> {
    let len = series.len();
    let mut result = vec![f64::NAN; len];
    for i in 0..len.saturating_sub(n) {
        result[i] = series[i + n];
    }
    result
}

/// Compute the full Ichimoku line set for a candle sequence.
pub fn ichimoku(candles: &[Candle], params: &IchimokuParams) -> IchimokuLines {
    let tenkan = rolling_midprice(candles, params.tenkan);
    let kijun = rolling_midprice(candles, params.kijun);

    let span_a_basis: Vec<f64> = tenkan
        .iter()
        .zip(&kijun)
        .map(|(&t, &k)| 0.5 * (t + k))
        .collect();
    let span_b_basis = rolling_midprice(candles, params.senkou);

    let senkou_a = shift_forward(&span_a_basis, params.kijun);
    let senkou_b = shift_forward(&span_b_basis, params.kijun);

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let chikou = shift_backward(&closes, params.kijun);

    IchimokuLines {
        tenkan,
        kijun,
        senkou_a,
        senkou_b,
        chikou,
    }
}
