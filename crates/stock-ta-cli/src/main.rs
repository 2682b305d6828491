//! stock-ta command-line interface
//!
//! Computes technical indicators over daily price history read from CSV
//! files. Diagnostics go to stderr and are filtered with `RUST_LOG`.

use std::process;

use stock_ta_cli::args::Args;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = stock_ta_cli::run(Args::parse_args()) {
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }
}
