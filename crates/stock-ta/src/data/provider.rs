//! Price history provider contract.
//!
//! The engine never fetches data itself. A [`HistoryProvider`] supplies the
//! bars; retrying a failed fetch is the provider's concern, not the core's.

use std::collections::HashMap;

use tracing::debug;

use super::bar::Bar;
use super::normalize::normalize;
use super::window::{Interval, Lookback};
use crate::error::{Error, Result};

/// Source of daily price history for a symbol.
pub trait HistoryProvider {
    /// Returns the bars for `symbol` covering `lookback`, aggregated to `interval`,
    /// in chronological order.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` when the provider has no data for the symbol
    /// - `Error::Provider` when the fetch itself failed
    fn fetch_history(&self, symbol: &str, lookback: Lookback, interval: Interval) -> Result<Vec<Bar>>;
}

impl<P: HistoryProvider + ?Sized> HistoryProvider for &P {
    fn fetch_history(&self, symbol: &str, lookback: Lookback, interval: Interval) -> Result<Vec<Bar>> {
        (**self).fetch_history(symbol, lookback, interval)
    }
}

/// Normalizes a full daily history, then applies `lookback` and `interval`.
///
/// Bars are validated and de-duplicated before they are trimmed or
/// aggregated, so a malformed day can never hide inside a weekly or monthly
/// bar. Shared by provider implementations that hold or load a complete
/// history.
///
/// # Errors
///
/// Returns `Error::Validation` if `bars` is empty or any bar is malformed;
/// the reported index is the bar's position in `bars`.
pub fn select_window(bars: Vec<Bar>, lookback: Lookback, interval: Interval) -> Result<Vec<Bar>> {
    let daily = normalize(bars)?;
    Ok(interval.resample(lookback.trim(&daily)))
}

/// A provider backed by in-memory histories keyed by upper-cased symbol.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stock_ta::data::{Bar, HistoryProvider, Interval, Lookback, MemoryProvider};
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let mut provider = MemoryProvider::new();
/// provider.insert("aapl", vec![Bar::new(date, 1.0, 1.0, 1.0, 1.0, 0.0)]);
///
/// let bars = provider.fetch_history("AAPL", Lookback::Max, Interval::Daily).unwrap();
/// assert_eq!(bars.len(), 1);
/// assert!(provider.fetch_history("MSFT", Lookback::Max, Interval::Daily).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    histories: HashMap<String, Vec<Bar>>,
}

impl MemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the full history for `symbol`, replacing any previous one.
    pub fn insert(&mut self, symbol: &str, bars: Vec<Bar>) {
        self.histories.insert(symbol.to_uppercase(), bars);
    }

    /// Number of symbols held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Returns true if no symbol is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

impl HistoryProvider for MemoryProvider {
    fn fetch_history(&self, symbol: &str, lookback: Lookback, interval: Interval) -> Result<Vec<Bar>> {
        let bars = self
            .histories
            .get(&symbol.to_uppercase())
            .filter(|bars| !bars.is_empty())
            .ok_or_else(|| Error::NotFound {
                symbol: symbol.to_string(),
            })?;

        let selected = select_window(bars.clone(), lookback, interval)?;
        debug!(symbol, %lookback, %interval, bars = selected.len(), "served history from memory");
        Ok(selected)
    }
}
