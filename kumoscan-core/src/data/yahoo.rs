//! Yahoo Finance data provider.
//!
//! Fetches OHLC candles from Yahoo's v8 chart API. Handles rate limiting,
//! retries with exponential backoff, and response parsing.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; parse failures surface as `DataError::ResponseFormatChanged`
//! so the scan can skip the symbol instead of aborting.

use super::provider::{DataError, DataProvider};
use crate::domain::{Candle, Timeframe};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Build the chart API URL for a symbol, interval, and trailing window.
    fn chart_url(symbol: &str, timeframe: Timeframe, lookback_days: u32, now: DateTime<Utc>) -> String {
        let end_ts = now.timestamp();
        let start_ts = (now - ChronoDuration::days(i64::from(lookback_days))).timestamp();
        let interval = timeframe.interval();
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval={interval}"
        )
    }

    /// Parse the chart API response into candles, oldest first.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<Candle>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let n = timestamps.len();
        let mut candles = Vec::with_capacity(n);

        for (i, &ts) in timestamps.iter().enumerate() {
            let timestamp = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
            })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();

            // Skip bars where all OHLC are None (holidays/non-trading slots)
            if open.is_none() && high.is_none() && low.is_none() && close.is_none() {
                continue;
            }

            candles.push(Candle {
                timestamp,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
            });
        }

        if candles.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }

    /// Execute the HTTP request with retry and backoff.
    fn fetch_with_retry(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        lookback_days: u32,
    ) -> Result<Vec<Candle>, DataError> {
        let url = Self::chart_url(symbol, timeframe, lookback_days, Utc::now());
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            debug!(symbol, interval = timeframe.interval(), attempt, "fetching chart data");

            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let chart: ChartResponse = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;

                    return Self::parse_response(symbol, chart);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        lookback_days: u32,
    ) -> Result<Vec<Candle>, DataError> {
        self.fetch_with_retry(symbol, timeframe, lookback_days)
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(json: &str) -> Result<Vec<Candle>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response("EURUSD=X", resp)
    }

    #[test]
    fn parse_well_formed_response() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1704153600,1704240000],
            "indicators":{"quote":[{
                "open":[1.10,1.11],
                "high":[1.12,1.13],
                "low":[1.09,1.10],
                "close":[1.11,1.12]
            }]}
        }],"error":null}}"#;
        let candles = parse(json).unwrap();
        assert_eq!(candles.len(), 2);
        assert!(candles[0].timestamp < candles[1].timestamp);
        assert_eq!(candles[1].close, 1.12);
    }

    #[test]
    fn parse_skips_all_null_rows() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1704153600,1704240000],
            "indicators":{"quote":[{
                "open":[1.10,null],
                "high":[1.12,null],
                "low":[1.09,null],
                "close":[1.11,null]
            }]}
        }],"error":null}}"#;
        let candles = parse(json).unwrap();
        assert_eq!(candles.len(), 1);
    }

    #[test]
    fn parse_partial_null_becomes_nan() {
        let json = r#"{"chart":{"result":[{
            "timestamp":[1704153600],
            "indicators":{"quote":[{
                "open":[1.10],
                "high":[null],
                "low":[1.09],
                "close":[1.11]
            }]}
        }],"error":null}}"#;
        let candles = parse(json).unwrap();
        assert!(candles[0].high.is_nan());
        assert!(candles[0].is_void());
    }

    #[test]
    fn parse_not_found_error() {
        let json = r#"{"chart":{"result":null,"error":{
            "code":"Not Found","description":"No data found"
        }}}"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn chart_url_encodes_interval_and_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let url = YahooProvider::chart_url("GC=F", Timeframe::H4, 60, now);
        assert!(url.contains("/chart/GC=F"));
        assert!(url.contains("interval=4h"));
        let start = (now - ChronoDuration::days(60)).timestamp();
        assert!(url.contains(&format!("period1={start}")));
    }
}
