//! Scan configuration — symbol universe and history window.
//!
//! Loadable from a TOML file; every field falls back to the built-in
//! defaults, so an empty config is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// The built-in universe: major and cross forex pairs, gold and silver
/// futures, and the two large-cap crypto pairs, in provider notation.
pub fn default_universe() -> Vec<String> {
    [
        "EURUSD=X", "EURJPY=X", "EURCAD=X", "EURAUD=X", "EURGBP=X", "EURCHF=X",
        "GBPUSD=X", "GBPJPY=X", "GBPCAD=X", "GBPAUD=X", "GBPCHF=X", "USDJPY=X",
        "USDCAD=X", "USDCHF=X", "AUDUSD=X", "AUDCAD=X", "AUDJPY=X", "AUDCHF=X",
        "CADJPY=X", "CADCHF=X", "CHFJPY=X", "NZDCHF=X", "GC=F", "SI=F",
        "BTC-USD", "ETH-USD",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Symbols to evaluate, in provider notation.
    #[serde(default = "default_universe")]
    pub symbols: Vec<String>,

    /// History window override in calendar days. When absent, each
    /// timeframe uses its standard window.
    #[serde(default)]
    pub lookback_days: Option<u32>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            symbols: default_universe(),
            lookback_days: None,
        }
    }
}

impl ScanConfig {
    /// Load a scan config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a scan config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
