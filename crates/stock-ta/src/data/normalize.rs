//! Series normalizer: validation, chronological ordering, de-duplication.

use std::ops::Deref;

use chrono::NaiveDate;
use tracing::debug;

use super::bar::Bar;
use crate::error::{Result, ValidationError};

/// A validated bar sequence: non-empty, strictly increasing in date, every
/// bar satisfying [`Bar::validate`].
///
/// Dereferences to `[Bar]`, so it can be passed to any indicator directly.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Returns the validated bars.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Returns the date axis.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        super::bar::dates(&self.bars)
    }

    /// Returns the first and last trading day.
    #[must_use]
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        // Non-empty by construction.
        (self.bars[0].date, self.bars[self.bars.len() - 1].date)
    }

    /// Consumes the series, returning the bars.
    #[must_use]
    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

impl Deref for PriceSeries {
    type Target = [Bar];

    fn deref(&self) -> &Self::Target {
        &self.bars
    }
}

/// Validates and orders a raw bar sequence.
///
/// Bars are sorted by date (stable). When several bars share a date, the one
/// appearing last in the input wins. Market holidays leave natural gaps,
/// which are not an error.
///
/// # Errors
///
/// Returns `Error::Validation` if the sequence is empty or any bar fails
/// [`Bar::validate`]. The reported index is the bar's position in `raw`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use stock_ta::data::{normalize, Bar};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let raw = vec![
///     Bar::new(d(3), 10.0, 11.0, 9.0, 10.0, 0.0),
///     Bar::new(d(2), 10.0, 11.0, 9.0, 10.0, 0.0),
/// ];
/// let series = normalize(raw).unwrap();
/// assert_eq!(series.dates(), vec![d(2), d(3)]);
/// ```
pub fn normalize(raw: Vec<Bar>) -> Result<PriceSeries> {
    if raw.is_empty() {
        return Err(ValidationError::EmptySeries.into());
    }

    for (index, bar) in raw.iter().enumerate() {
        bar.validate(index)?;
    }

    let input_len = raw.len();
    let mut bars = raw;
    bars.sort_by_key(|bar| bar.date);

    let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match deduped.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => deduped.push(bar),
        }
    }

    debug!(
        bars_in = input_len,
        bars_out = deduped.len(),
        duplicates = input_len - deduped.len(),
        "normalized bar series"
    );

    Ok(PriceSeries { bars: deduped })
}
