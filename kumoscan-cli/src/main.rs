//! Kumoscan CLI — momentum and multi-timeframe strategy scans.
//!
//! Commands:
//! - `scan` — score every symbol on one timeframe and print the ranked
//!   momentum report
//! - `strategy` — evaluate 1D and 4H per symbol and print the ranked
//!   strategy report
//!
//! Symbol precedence: positional arguments, then the `--config` TOML file,
//! then the built-in universe.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kumoscan_core::data::YahooProvider;
use kumoscan_core::Timeframe;
use kumoscan_runner::{
    export_momentum_csv, export_momentum_json, export_strategy_csv, export_strategy_json,
    momentum_report, scan_momentum, scan_strategy, strategy_report, ScanConfig, StdoutProgress,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kumoscan",
    about = "Ichimoku confluence scanner — momentum and strategy reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every symbol on a single timeframe and print the momentum report.
    Scan {
        /// Symbols in provider notation (e.g. EURUSD=X GC=F BTC-USD).
        symbols: Vec<String>,

        /// Chart timeframe: 1d, 4h, or 1h.
        #[arg(long, default_value = "1d")]
        timeframe: String,

        /// History window in days. Defaults to the timeframe's standard window.
        #[arg(long)]
        lookback: Option<u32>,

        /// TOML config file with the symbol universe.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the ranked rows to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the ranked rows to a JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Evaluate 1D and 4H per symbol and print the ranked strategy report.
    Strategy {
        /// Symbols in provider notation. Defaults to the built-in universe.
        symbols: Vec<String>,

        /// History window in days, applied to both timeframes.
        #[arg(long)]
        lookback: Option<u32>,

        /// TOML config file with the symbol universe.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the ranked rows to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the ranked rows to a JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            symbols,
            timeframe,
            lookback,
            config,
            csv,
            json,
        } => run_scan(symbols, &timeframe, lookback, config, csv, json),
        Commands::Strategy {
            symbols,
            lookback,
            config,
            csv,
            json,
        } => run_strategy(symbols, lookback, config, csv, json),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Resolve the symbol list and lookback override from args and config.
fn resolve_config(
    arg_symbols: Vec<String>,
    arg_lookback: Option<u32>,
    config_path: Option<&Path>,
) -> Result<(Vec<String>, Option<u32>)> {
    let config = match config_path {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("failed to load scan config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    let symbols = if arg_symbols.is_empty() {
        config.symbols
    } else {
        arg_symbols
    };
    let lookback = arg_lookback.or(config.lookback_days);
    Ok((symbols, lookback))
}

fn write_artifact(path: &Path, content: &str, what: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {what} {}", path.display()))?;
    println!("Wrote {what}: {}", path.display());
    Ok(())
}

fn run_scan(
    symbols: Vec<String>,
    timeframe: &str,
    lookback: Option<u32>,
    config: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let timeframe: Timeframe = timeframe.parse().map_err(anyhow::Error::msg)?;
    let (symbols, lookback) = resolve_config(symbols, lookback, config.as_deref())?;

    let provider = YahooProvider::new();
    let (results, _summary) =
        scan_momentum(&provider, &symbols, timeframe, lookback, &StdoutProgress);

    print!("{}", momentum_report(&results));

    if let Some(path) = csv {
        write_artifact(&path, &export_momentum_csv(&results)?, "CSV report")?;
    }
    if let Some(path) = json {
        write_artifact(&path, &export_momentum_json(&results)?, "JSON report")?;
    }
    Ok(())
}

fn run_strategy(
    symbols: Vec<String>,
    lookback: Option<u32>,
    config: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let (symbols, lookback) = resolve_config(symbols, lookback, config.as_deref())?;

    let provider = YahooProvider::new();
    let (signals, _summary) = scan_strategy(&provider, &symbols, lookback, &StdoutProgress);

    print!("{}", strategy_report(&signals));

    if let Some(path) = csv {
        write_artifact(&path, &export_strategy_csv(&signals)?, "CSV report")?;
    }
    if let Some(path) = json {
        write_artifact(&path, &export_strategy_json(&signals)?, "JSON report")?;
    }
    Ok(())
}
