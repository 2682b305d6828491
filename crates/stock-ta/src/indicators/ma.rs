//! Simple moving averages of the close.
//!
//! The `MA` indicator always produces the same four averages, one per period
//! in [`MA_PERIODS`], keyed `MA5`, `MA10`, `MA20` and `MA60`. Positions before
//! a full window are undefined; a period longer than the history yields an
//! all-undefined series.

use std::collections::BTreeMap;

use crate::config::MA_PERIODS;
use crate::data::{close_prices, Bar};
use crate::error::Result;
use crate::kernels::rolling_mean;
use crate::series::Series;

/// Output key for the moving average over `period` bars.
#[must_use]
pub fn ma_key(period: usize) -> String {
    format!("MA{period}")
}

/// The four moving averages of the close, in period order.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverages {
    averages: Vec<(usize, Series)>,
}

impl MovingAverages {
    /// Returns the average for `period`, if it is one of [`MA_PERIODS`].
    #[must_use]
    pub fn get(&self, period: usize) -> Option<&Series> {
        self.averages
            .iter()
            .find(|(p, _)| *p == period)
            .map(|(_, series)| series)
    }

    /// Iterates over `(period, series)` pairs in ascending period order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Series)> {
        self.averages.iter().map(|(p, series)| (*p, series))
    }

    /// Converts into a map keyed by output series name.
    #[must_use]
    pub fn into_named(self) -> BTreeMap<String, Series> {
        self.averages
            .into_iter()
            .map(|(period, series)| (ma_key(period), series))
            .collect()
    }
}

/// Simple moving average of the close over `period` bars.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is 0.
pub fn sma(bars: &[Bar], period: usize) -> Result<Series> {
    rolling_mean(&close_prices(bars), period).map(Series::from_raw)
}

/// Computes MA5, MA10, MA20 and MA60 of the close.
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate};
/// use stock_ta::data::Bar;
/// use stock_ta::indicators::moving_average;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars: Vec<Bar> = (1..=10)
///     .map(|i| {
///         let c = f64::from(i);
///         Bar::new(start + Days::new(i as u64), c, c, c, c, 0.0)
///     })
///     .collect();
///
/// let ma = moving_average(&bars).unwrap();
/// let ma5 = ma.get(5).unwrap();
/// assert_eq!(ma5.get(3), None);
/// assert_eq!(ma5.get(4), Some(3.0));
/// assert_eq!(ma.get(20).unwrap().defined_count(), 0);
/// ```
///
/// # Errors
///
/// Never fails for the fixed period set; the `Result` mirrors the other
/// indicators so the engine can treat them uniformly.
pub fn moving_average(bars: &[Bar]) -> Result<MovingAverages> {
    let closes = close_prices(bars);
    let averages = MA_PERIODS
        .iter()
        .map(|&period| Ok((period, Series::from_raw(rolling_mean(&closes, period)?))))
        .collect::<Result<Vec<_>>>()?;
    Ok(MovingAverages { averages })
}
