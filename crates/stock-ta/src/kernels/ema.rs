//! Exponential smoothing (EMA).
//!
//! ```text
//! alpha  = 2 / (span + 1)
//! ema[0] = x[0]
//! ema[i] = alpha * x[i] + (1 - alpha) * ema[i-1]
//! ```
//!
//! Unlike the rolling-window kernels, the EMA is defined from index 0: there
//! is no warm-up prefix. MACD depends on this, so its line, signal and
//! histogram are all defined from the first bar.
//!
//! A NaN sample makes the EMA NaN from that point on, since every later value
//! depends on it recursively.

use crate::error::Result;
use crate::traits::{ensure_period, Sample};

/// Returns the smoothing factor `2 / (span + 1)`.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `span` is zero.
#[inline]
pub fn ema_alpha<T: Sample>(span: usize) -> Result<T> {
    ensure_period(span)?;
    T::smoothing(span)
}

/// Computes the exponential moving average of `data` with the given span.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `span` is zero.
///
/// # Example
///
/// ```
/// use stock_ta::kernels::ema::ema;
///
/// let result = ema(&[10.0_f64, 11.0, 12.0], 3).unwrap();
/// // Defined immediately: seeded with the first sample.
/// assert_eq!(result[0], 10.0);
/// // alpha = 0.5
/// assert_eq!(result[1], 10.5);
/// assert_eq!(result[2], 11.25);
/// ```
pub fn ema<T: Sample>(data: &[T], span: usize) -> Result<Vec<T>> {
    let alpha = ema_alpha::<T>(span)?;

    let mut result = Vec::with_capacity(data.len());
    let mut iter = data.iter();
    if let Some(&first) = iter.next() {
        let mut prev = first;
        result.push(prev);
        for &x in iter {
            prev = prev + alpha * (x - prev);
            result.push(prev);
        }
    }

    Ok(result)
}
