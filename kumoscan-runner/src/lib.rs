//! Kumoscan Runner — scan orchestration, ranking, reports, and export.
//!
//! This crate builds on `kumoscan-core` to provide:
//! - Momentum scans (one timeframe) and strategy scans (1D + 4H) that fan
//!   out across symbols and skip failures
//! - Ranking: verdict categories for momentum, priority-then-power for
//!   strategy signals
//! - Text report rendering plus CSV/JSON export
//! - TOML scan configuration with the built-in default universe

pub mod config;
pub mod export;
pub mod report;
pub mod scan;

pub use config::{default_universe, ConfigError, ScanConfig};
pub use export::{
    export_momentum_csv, export_momentum_json, export_strategy_csv, export_strategy_json,
};
pub use report::{
    display_symbol, momentum_report, rank_momentum, rank_signals, strategy_report, RankedMomentum,
};
pub use scan::{
    scan_momentum, scan_strategy, ScanProgress, ScanSummary, SilentProgress, StdoutProgress,
};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn scan_summary_is_send_sync() {
        assert_send::<ScanSummary>();
        assert_sync::<ScanSummary>();
    }

    #[test]
    fn config_is_send_sync() {
        assert_send::<ScanConfig>();
        assert_sync::<ScanConfig>();
    }

    #[test]
    fn ranked_momentum_is_send_sync() {
        assert_send::<RankedMomentum>();
        assert_sync::<RankedMomentum>();
    }
}
