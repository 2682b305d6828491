//! Errors of the `stock-ta` binary and their exit codes.
//!
//! [`CliError`] covers file access, CSV parsing and argument checks, and
//! wraps every [`stock_ta::Error`] unchanged. Messages name the offending
//! path, line or flag.

use std::io;

use thiserror::Error;

/// Anything that stops a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be opened, created or written.
    #[error("I/O error with '{path}': {source}. Check that the path exists and is accessible")]
    Io {
        /// File path.
        path: String,
        /// Cause.
        #[source]
        source: io::Error,
    },

    /// Writing to stdout failed.
    #[error("I/O error: {0}")]
    Stream(#[from] io::Error),

    /// The price CSV could not be parsed.
    #[error("CSV parse error{}: {message}", .line.map(|l| format!(" on line {l}")).unwrap_or_default())]
    CsvParse {
        /// What was wrong.
        message: String,
        /// 1-based line in the file, when known.
        line: Option<u64>,
    },

    /// A flag combination clap cannot reject on its own.
    #[error("invalid argument '{argument}': {reason}{}", .suggestion.as_ref().map(|s| format!(". {s}")).unwrap_or_default())]
    InvalidArgument {
        /// The flag, e.g. `--symbol`.
        argument: String,
        /// Why it was rejected.
        reason: String,
        /// How to fix the command line.
        suggestion: Option<String>,
    },

    /// The result could not be serialized.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An error from the indicator engine or a price provider.
    #[error(transparent)]
    Engine(#[from] stock_ta::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// - `2`: bad arguments or configuration
    /// - `3`: no price history for the symbol
    /// - `4`: malformed price data
    /// - `1`: anything else
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::Engine(stock_ta::Error::Config { .. }) => 2,
            Self::Engine(err) if err.is_not_found() => 3,
            Self::CsvParse { .. } => 4,
            Self::Engine(err) if err.is_validation() => 4,
            Self::Engine(stock_ta::Error::InvalidParameter { .. }) => 2,
            _ => 1,
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(csv::Position::line);
        Self::CsvParse {
            message: err.to_string(),
            line,
        }
    }
}

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;
