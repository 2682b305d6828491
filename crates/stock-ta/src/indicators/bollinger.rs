//! Bollinger Bands.
//!
//! ```text
//! middle = SMA(close, period)
//! upper  = middle + dev_up   * stddev(close, period)
//! lower  = middle - dev_down * stddev(close, period)
//! ```
//!
//! The standard deviation is the population form (divide by `period`),
//! computed by the same rolling pass as the middle band. Positions before a
//! full window are undefined in all three bands.

use std::collections::BTreeMap;

use crate::data::{close_prices, Bar};
use crate::error::{Error, Result};
use crate::kernels::rolling_moments;
use crate::series::Series;

/// Output key of the upper band.
pub const BBANDS_UPPER_KEY: &str = "BBANDS_upper";
/// Output key of the middle band.
pub const BBANDS_MIDDLE_KEY: &str = "BBANDS_middle";
/// Output key of the lower band.
pub const BBANDS_LOWER_KEY: &str = "BBANDS_lower";

/// Output of [`bollinger_bands`].
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput {
    /// Middle band plus `dev_up` deviations.
    pub upper: Series,
    /// Rolling mean of the close.
    pub middle: Series,
    /// Middle band minus `dev_down` deviations.
    pub lower: Series,
}

impl BollingerOutput {
    /// Converts into a map keyed by output series name.
    #[must_use]
    pub fn into_named(self) -> BTreeMap<String, Series> {
        BTreeMap::from([
            (BBANDS_UPPER_KEY.to_string(), self.upper),
            (BBANDS_MIDDLE_KEY.to_string(), self.middle),
            (BBANDS_LOWER_KEY.to_string(), self.lower),
        ])
    }
}

fn validate_multiplier(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: name.to_string(),
            reason: format!("deviation multiplier must be finite, got {value}"),
        })
    }
}

/// Computes Bollinger Bands over the close.
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate};
/// use stock_ta::data::Bar;
/// use stock_ta::indicators::bollinger_bands;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars: Vec<Bar> = (0..25)
///     .map(|i| Bar::new(start + Days::new(i), 50.0, 50.0, 50.0, 50.0, 0.0))
///     .collect();
///
/// let bands = bollinger_bands(&bars, 20, 2.0, 2.0).unwrap();
/// assert_eq!(bands.middle.get(18), None);
/// assert_eq!(bands.upper.get(19), Some(50.0));
/// assert_eq!(bands.lower.get(24), Some(50.0));
/// ```
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `period` is 0
/// - `Error::InvalidParameter` if a multiplier is NaN or infinite
pub fn bollinger_bands(
    bars: &[Bar],
    period: usize,
    dev_up: f64,
    dev_down: f64,
) -> Result<BollingerOutput> {
    bollinger_from_closes(&close_prices(bars), period, dev_up, dev_down)
}

/// Computes Bollinger Bands over a raw close series.
///
/// # Errors
///
/// See [`bollinger_bands`].
pub fn bollinger_from_closes(
    closes: &[f64],
    period: usize,
    dev_up: f64,
    dev_down: f64,
) -> Result<BollingerOutput> {
    validate_multiplier("dev_up", dev_up)?;
    validate_multiplier("dev_down", dev_down)?;

    let moments = rolling_moments(closes, period)?;
    let upper = moments
        .mean
        .iter()
        .zip(&moments.std_dev)
        .map(|(m, sd)| m + dev_up * sd)
        .collect();
    let lower = moments
        .mean
        .iter()
        .zip(&moments.std_dev)
        .map(|(m, sd)| m - dev_down * sd)
        .collect();

    Ok(BollingerOutput {
        upper: Series::from_raw(upper),
        middle: Series::from_raw(moments.mean),
        lower: Series::from_raw(lower),
    })
}
