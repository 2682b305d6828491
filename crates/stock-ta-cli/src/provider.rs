//! Price history provider backed by a directory of per-symbol CSV files.

use std::path::{Path, PathBuf};

use stock_ta::data::{select_window, Bar, HistoryProvider, Interval, Lookback};
use tracing::debug;

use crate::csv_parser::parse_bars;
use crate::error::CliError;

/// Serves `<dir>/<SYMBOL>.csv`, each holding the full daily history of one symbol.
///
/// The file name is looked up as given first, then upper-cased, so both
/// `aapl.csv` and `AAPL.csv` work for a request of `aapl`.
#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    dir: PathBuf,
}

impl CsvDirectoryProvider {
    /// Creates a provider reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn locate(&self, symbol: &str) -> Option<PathBuf> {
        [symbol.to_string(), symbol.to_uppercase()]
            .into_iter()
            .map(|name| self.dir.join(format!("{name}.csv")))
            .find(|path| path.is_file())
    }
}

impl HistoryProvider for CsvDirectoryProvider {
    fn fetch_history(
        &self,
        symbol: &str,
        lookback: Lookback,
        interval: Interval,
    ) -> stock_ta::Result<Vec<Bar>> {
        let not_found = || stock_ta::Error::NotFound {
            symbol: symbol.to_string(),
        };

        // Symbols are file names; anything that could escape the directory has no data.
        if symbol.contains(['/', '\\']) || symbol.starts_with('.') {
            return Err(not_found());
        }

        let path = self.locate(symbol).ok_or_else(not_found)?;
        let bars = parse_bars(&path).map_err(|err| match err {
            CliError::Engine(inner) => inner,
            other => stock_ta::Error::Provider {
                symbol: symbol.to_string(),
                message: other.to_string(),
            },
        })?;

        if bars.is_empty() {
            return Err(not_found());
        }

        let selected = select_window(bars, lookback, interval)?;
        debug!(
            symbol,
            path = %path.display(),
            %lookback,
            %interval,
            bars = selected.len(),
            "loaded history from CSV"
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "date,open,high,low,close,volume\n";

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), format!("{HEADER}{body}")).unwrap();
    }

    #[test]
    fn test_fetch_reads_symbol_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "ACME.csv",
            "2024-01-03,2,3,1,2.5,10\n2024-01-02,1,2,0.5,1.5,10\n",
        );
        let provider = CsvDirectoryProvider::new(dir.path());
        let bars = provider
            .fetch_history("acme", Lookback::Max, Interval::Daily)
            .unwrap();
        assert_eq!(bars.len(), 2);
        // select_window normalizes into chronological order
        assert!(bars[0].date < bars[1].date);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvDirectoryProvider::new(dir.path());
        let err = provider
            .fetch_history("NOPE", Lookback::OneYear, Interval::Daily)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "EMPTY.csv", "");
        let provider = CsvDirectoryProvider::new(dir.path());
        assert!(provider
            .fetch_history("EMPTY", Lookback::OneYear, Interval::Daily)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_malformed_file_is_provider_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "BAD.csv", "2024-01-02,1,x,0.5,1.5,10\n");
        let provider = CsvDirectoryProvider::new(dir.path());
        let err = provider
            .fetch_history("BAD", Lookback::OneYear, Interval::Daily)
            .unwrap_err();
        assert!(matches!(err, stock_ta::Error::Provider { ref symbol, .. } if symbol == "BAD"));
    }

    #[test]
    fn test_path_like_symbol_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvDirectoryProvider::new(dir.path());
        assert!(provider
            .fetch_history("../etc/passwd", Lookback::Max, Interval::Daily)
            .unwrap_err()
            .is_not_found());
    }
}
