//! Daily OHLCV bar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BarField, ValidationError};

/// One trading day's prices and volume.
///
/// Deserialization accepts `adjusted_close` (or `adj_close`) as optional and
/// falls back to `close` when it is absent.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stock_ta::data::Bar;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let bar = Bar::new(date, 10.0, 12.0, 9.5, 11.0, 1_000.0);
/// assert_eq!(bar.adjusted_close, 11.0);
/// assert!(bar.validate(0).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBar")]
pub struct Bar {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Split/dividend adjusted close.
    pub adjusted_close: f64,
    /// Traded volume.
    pub volume: f64,
}

#[derive(Deserialize)]
struct RawBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default, alias = "adj_close")]
    adjusted_close: Option<f64>,
    #[serde(default)]
    volume: f64,
}

impl From<RawBar> for Bar {
    fn from(raw: RawBar) -> Self {
        Self {
            date: raw.date,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            adjusted_close: raw.adjusted_close.unwrap_or(raw.close),
            volume: raw.volume,
        }
    }
}

impl Bar {
    /// Creates a bar whose adjusted close equals its close.
    #[must_use]
    pub const fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            adjusted_close: close,
            volume,
        }
    }

    /// Sets the adjusted close.
    #[must_use]
    pub const fn with_adjusted_close(mut self, adjusted_close: f64) -> Self {
        self.adjusted_close = adjusted_close;
        self
    }

    /// Checks the numeric invariants of a single bar.
    ///
    /// `index` is the bar's position in the raw input and is carried into the
    /// error for diagnostics.
    ///
    /// # Errors
    ///
    /// - `NonFinite` if any field is NaN or infinite
    /// - `NonPositivePrice` if open/high/low/close is not strictly positive
    /// - `Negative` if volume or adjusted close is negative
    /// - `InconsistentRange` unless `low <= min(open, close) <= max(open, close) <= high`
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let fields = [
            (BarField::Open, self.open),
            (BarField::High, self.high),
            (BarField::Low, self.low),
            (BarField::Close, self.close),
            (BarField::AdjustedClose, self.adjusted_close),
            (BarField::Volume, self.volume),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { index, field });
            }
        }

        for (field, value) in &fields[..4] {
            if *value <= 0.0 {
                return Err(ValidationError::NonPositivePrice {
                    index,
                    field: *field,
                    value: *value,
                });
            }
        }

        for (field, value) in &fields[4..] {
            if *value < 0.0 {
                return Err(ValidationError::Negative {
                    index,
                    field: *field,
                    value: *value,
                });
            }
        }

        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if self.low > body_low || body_high > self.high {
            return Err(ValidationError::InconsistentRange {
                index,
                open: self.open,
                high: self.high,
                low: self.low,
                close: self.close,
            });
        }

        Ok(())
    }
}

/// Extracts the closing prices of `bars`.
#[must_use]
pub fn close_prices(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extracts the session highs of `bars`.
#[must_use]
pub fn high_prices(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.high).collect()
}

/// Extracts the session lows of `bars`.
#[must_use]
pub fn low_prices(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.low).collect()
}

/// Extracts the dates of `bars`.
#[must_use]
pub fn dates(bars: &[Bar]) -> Vec<NaiveDate> {
    bars.iter().map(|b| b.date).collect()
}
