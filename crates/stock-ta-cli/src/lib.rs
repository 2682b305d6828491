//! stock-ta CLI library
//!
//! This module exposes the CLI components for testing and reuse.

pub mod args;
pub mod csv_parser;
pub mod error;
pub mod output;
pub mod provider;

pub use error::{CliError, Result};

use std::io::Write;

use stock_ta::analysis::{analyze, AnalysisRequest};
use stock_ta::config::EngineConfig;
use stock_ta::data::{HistoryProvider, MemoryProvider};
use stock_ta::engine::Engine;
use tracing::{info, warn};

use crate::args::{indicator_listing, AnalyzeArgs, Args, Command};
use crate::csv_parser::parse_bars;
use crate::output::{write_report, OutputDest};
use crate::provider::CsvDirectoryProvider;

/// Runs a parsed command line.
///
/// # Errors
///
/// Returns the first error hit while validating arguments, loading data,
/// computing indicators or writing output.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Indicators => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(indicator_listing().as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Command::Analyze(analyze_args) => run_analyze(&analyze_args),
    }
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    args.validate()?;

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config);
    let symbol = args.symbol();

    let provider: Box<dyn HistoryProvider> = match (&args.input, &args.data_dir) {
        (Some(path), _) => {
            let mut memory = MemoryProvider::new();
            memory.insert(&symbol, parse_bars(path)?);
            Box::new(memory)
        }
        (None, Some(dir)) => Box::new(CsvDirectoryProvider::new(dir)),
        (None, None) => {
            return Err(CliError::InvalidArgument {
                argument: "--input".to_string(),
                reason: "no price source given".to_string(),
                suggestion: Some("Pass --input <FILE> or --data-dir <DIR>".to_string()),
            })
        }
    };

    let request = AnalysisRequest::new(symbol, args.indicators.iter().map(String::as_str))
        .with_range(args.start, args.end)
        .with_lookback(args.lookback)
        .with_interval(args.interval);

    let report = analyze(provider.as_ref(), &request, &engine)?;
    for (indicator, message) in &report.result.failures {
        warn!(indicator, message, "indicator could not be computed");
    }

    let dest = OutputDest::from(args.output.clone());
    write_report(&report, args.format, args.pretty, &dest)?;
    if let OutputDest::File(path) = &dest {
        info!(path = %path.display(), rows = report.result.len(), "wrote report");
    }
    Ok(())
}
