//! Relative Strength Index.
//!
//! Gains and losses are averaged with a simple rolling mean (not Wilder
//! smoothing):
//!
//! ```text
//! delta[i] = close[i] - close[i-1]          (delta[0] contributes nothing)
//! gain[i]  = max(delta[i], 0)
//! loss[i]  = max(-delta[i], 0)
//! RS       = mean(gain, period) / mean(loss, period)
//! RSI      = 100 - 100 / (1 + RS)
//! ```
//!
//! The first defined position is `period - 1`. Two degenerate windows are
//! resolved explicitly rather than left to floating-point division:
//!
//! - no losses but some gains: RSI is exactly 100
//! - neither gains nor losses (flat window): RSI is undefined
//!
//! Both cases are detected by counting non-zero gains and losses in the
//! window, so they do not depend on the rolling mean returning an exact zero.

use crate::data::{close_prices, Bar};
use crate::error::Result;
use crate::kernels::rolling_mean;
use crate::series::Series;
use crate::traits::ensure_period;

/// Output key of the RSI series.
pub const RSI_KEY: &str = "RSI";

/// Computes the RSI of the close over `period` bars.
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate};
/// use stock_ta::data::Bar;
/// use stock_ta::indicators::rsi;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars: Vec<Bar> = (1..=16)
///     .map(|i| {
///         let c = f64::from(i);
///         Bar::new(start + Days::new(i as u64), c, c, c, c, 0.0)
///     })
///     .collect();
///
/// let series = rsi(&bars, 14).unwrap();
/// assert_eq!(series.get(12), None);
/// assert_eq!(series.get(13), Some(100.0));
/// ```
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is 0.
pub fn rsi(bars: &[Bar], period: usize) -> Result<Series> {
    rsi_from_closes(&close_prices(bars), period)
}

/// Computes the RSI of a raw close series.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is 0.
pub fn rsi_from_closes(closes: &[f64], period: usize) -> Result<Series> {
    ensure_period(period)?;

    let n = closes.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = closes[i] - closes[i - 1];
        if delta.is_nan() {
            gains[i] = f64::NAN;
            losses[i] = f64::NAN;
        } else if delta > 0.0 {
            gains[i] = delta;
        } else if delta < 0.0 {
            losses[i] = -delta;
        }
    }

    let avg_gain = rolling_mean(&gains, period)?;
    let avg_loss = rolling_mean(&losses, period)?;

    let mut out = vec![None; n];
    let mut gain_count = 0usize;
    let mut loss_count = 0usize;
    for i in 0..n {
        gain_count += usize::from(gains[i] > 0.0);
        loss_count += usize::from(losses[i] > 0.0);
        if i >= period {
            gain_count -= usize::from(gains[i - period] > 0.0);
            loss_count -= usize::from(losses[i - period] > 0.0);
        }
        if i + 1 < period || avg_gain[i].is_nan() || avg_loss[i].is_nan() {
            continue;
        }

        out[i] = match (gain_count, loss_count) {
            (0, 0) => None,
            (_, 0) => Some(100.0),
            (0, _) => Some(0.0),
            _ => {
                let rs = avg_gain[i] / avg_loss[i];
                Some(100.0 - 100.0 / (1.0 + rs))
            }
        };
    }

    Ok(Series::from(out))
}
