//! Moving Average Convergence Divergence.
//!
//! ```text
//! MACD line = EMA(close, fast) - EMA(close, slow)
//! Signal    = EMA(MACD line, signal)
//! Histogram = MACD line - Signal
//! ```
//!
//! The EMAs are seeded with the first close and use `alpha = 2 / (span + 1)`
//! with no warm-up suppression, so all three series are defined from the
//! first bar onward.

use std::collections::BTreeMap;

use crate::data::{close_prices, Bar};
use crate::error::Result;
use crate::kernels::ema;
use crate::series::Series;

/// Output key of the MACD line.
pub const MACD_KEY: &str = "MACD";
/// Output key of the signal line.
pub const MACD_SIGNAL_KEY: &str = "MACD_signal";
/// Output key of the histogram.
pub const MACD_HIST_KEY: &str = "MACD_hist";

/// Output of [`macd`].
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA.
    pub macd: Series,
    /// EMA of the MACD line.
    pub signal: Series,
    /// MACD line minus signal line.
    pub histogram: Series,
}

impl MacdOutput {
    /// Number of positions in each series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// Returns true if the output is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    /// Converts into a map keyed by output series name.
    #[must_use]
    pub fn into_named(self) -> BTreeMap<String, Series> {
        BTreeMap::from([
            (MACD_KEY.to_string(), self.macd),
            (MACD_SIGNAL_KEY.to_string(), self.signal),
            (MACD_HIST_KEY.to_string(), self.histogram),
        ])
    }
}

/// Computes MACD over the close.
///
/// `fast` is not required to be shorter than `slow`; swapping them only
/// flips the sign of the line.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if any span is 0.
pub fn macd(bars: &[Bar], fast: usize, slow: usize, signal: usize) -> Result<MacdOutput> {
    macd_from_closes(&close_prices(bars), fast, slow, signal)
}

/// Computes MACD over a raw close series.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if any span is 0.
pub fn macd_from_closes(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdOutput> {
    let fast_ema = ema(closes, fast)?;
    let slow_ema = ema(closes, slow)?;

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&line, signal)?;
    let histogram: Vec<f64> = line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd: Series::from_raw(line),
        signal: Series::from_raw(signal_line),
        histogram: Series::from_raw(histogram),
    })
}
