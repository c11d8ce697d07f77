//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over candle sources so scans can swap
//! implementations and tests can run against fixtures. Every fetch failure
//! is a skip decision at the scan level — the batch continues without the
//! symbol.

use crate::domain::{Candle, Timeframe};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for candle providers.
///
/// Implementations must return candles in strictly increasing timestamp
/// order, covering the trailing `lookback_days` window at the requested
/// interval.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch OHLC candles for a symbol over the trailing lookback window.
    fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        lookback_days: u32,
    ) -> Result<Vec<Candle>, DataError>;
}
