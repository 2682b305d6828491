//! CLI argument parsing module.
//!
//! This module defines the command-line interface for stock-ta using clap.
//!
//! # Examples
//!
//! ```bash
//! # All indicators over a single CSV file
//! stock-ta analyze --input aapl.csv
//!
//! # Selected indicators for one symbol out of a directory of <SYMBOL>.csv files
//! stock-ta analyze --data-dir prices/ --symbol MSFT --indicators MA,RSI
//!
//! # Restrict the reported rows, weekly bars, pretty JSON to a file
//! stock-ta analyze --input aapl.csv --start 2024-03-01 --end 2024-06-30 \
//!     --interval 1wk --pretty -o report.json
//!
//! # Supported indicators and their output series
//! stock-ta indicators
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use stock_ta::data::{Interval, Lookback};
use stock_ta::engine::IndicatorKind;

use crate::error::{CliError, Result};

/// stock-ta: technical indicators over daily price history
#[derive(Parser, Debug)]
#[command(name = "stock-ta")]
#[command(author, version, about = "Technical indicators over daily stock price history")]
#[command(long_about = "stock-ta reads daily OHLCV bars from CSV files, computes moving \
    averages, RSI, MACD, Bollinger Bands and the stochastic oscillator, and writes the \
    date-aligned series as JSON or CSV. Set RUST_LOG to control diagnostics on stderr.")]
pub struct Args {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute indicators for one symbol
    Analyze(AnalyzeArgs),

    /// List supported indicators and their output series
    Indicators,
}

/// Output encoding.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `{symbol, dates, indicators, failures}` JSON document
    #[default]
    Json,
    /// One row per date, one column per series
    Csv,
}

/// Arguments of `stock-ta analyze`.
#[derive(ClapArgs, Debug, Clone)]
pub struct AnalyzeArgs {
    /// CSV file holding the full daily history of one symbol
    #[arg(short, long, conflicts_with = "data_dir", required_unless_present = "data_dir")]
    pub input: Option<PathBuf>,

    /// Directory of <SYMBOL>.csv files
    #[arg(short = 'd', long)]
    pub data_dir: Option<PathBuf>,

    /// Ticker symbol (defaults to the input file name with --input)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Comma-separated indicator names
    #[arg(short = 'I', long, value_delimiter = ',', default_value = "MA,RSI,MACD,BBANDS,STOCH")]
    pub indicators: Vec<String>,

    /// First date to report (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date to report (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// History to load: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max
    #[arg(long, default_value = "1y")]
    pub lookback: Lookback,

    /// Bar size: 1d, 1wk, 1mo
    #[arg(long, default_value = "1d")]
    pub interval: Interval,

    /// JSON engine configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl AnalyzeArgs {
    /// Checks the constraints clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArgument` when `--data-dir` lacks `--symbol`,
    /// the symbol is blank, or `--start` is after `--end`.
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.is_some() && self.symbol.is_none() {
            return Err(CliError::InvalidArgument {
                argument: "--symbol".to_string(),
                reason: "required with --data-dir".to_string(),
                suggestion: Some("Pass the symbol whose <SYMBOL>.csv should be read".to_string()),
            });
        }

        if self.symbol.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(CliError::InvalidArgument {
                argument: "--symbol".to_string(),
                reason: "must not be empty".to_string(),
                suggestion: None,
            });
        }

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(CliError::InvalidArgument {
                    argument: "--start".to_string(),
                    reason: format!("{start} is after --end {end}"),
                    suggestion: Some("Swap the two dates".to_string()),
                });
            }
        }

        Ok(())
    }

    /// The symbol to report: `--symbol`, or the input file stem.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.symbol
            .clone()
            .or_else(|| {
                self.input
                    .as_ref()
                    .and_then(|p| p.file_stem())
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_default()
    }
}

/// Renders the `stock-ta indicators` listing.
#[must_use]
pub fn indicator_listing() -> String {
    IndicatorKind::ALL
        .iter()
        .map(|kind| format!("{:<8}{}\n", kind.name(), kind.series_keys().join(", ")))
        .collect()
}
