//! Timeframe — supported chart intervals and their history windows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart interval for a scan.
///
/// Daily charts need a longer history window than intraday ones to clear the
/// Ichimoku warmup at a comparable bar count; `default_lookback_days` carries
/// the standard window per interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    D1,
    H4,
    H1,
}

impl Timeframe {
    /// Interval string understood by the chart API.
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::D1 => "1d",
            Timeframe::H4 => "4h",
            Timeframe::H1 => "1h",
        }
    }

    /// Default history window in calendar days.
    pub fn default_lookback_days(&self) -> u32 {
        match self {
            Timeframe::D1 => 250,
            Timeframe::H4 | Timeframe::H1 => 60,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interval())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Timeframe::D1),
            "4h" => Ok(Timeframe::H4),
            "1h" => Ok(Timeframe::H1),
            other => Err(format!("unknown timeframe '{other}' (expected 1d, 4h, or 1h)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_strings() {
        assert_eq!(Timeframe::D1.interval(), "1d");
        assert_eq!(Timeframe::H4.interval(), "4h");
        assert_eq!(Timeframe::H1.interval(), "1h");
    }

    #[test]
    fn lookback_windows() {
        assert_eq!(Timeframe::D1.default_lookback_days(), 250);
        assert_eq!(Timeframe::H4.default_lookback_days(), 60);
        assert_eq!(Timeframe::H1.default_lookback_days(), 60);
    }

    #[test]
    fn parse_roundtrip() {
        for tf in [Timeframe::D1, Timeframe::H4, Timeframe::H1] {
            assert_eq!(tf.interval().parse::<Timeframe>().unwrap(), tf);
        }
        assert!("15m".parse::<Timeframe>().is_err());
    }

    #[test]
    fn display_matches_interval() {
        assert_eq!(Timeframe::H4.to_string(), "4h");
    }
}
