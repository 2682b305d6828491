//! Numeric element trait shared by the kernels.
//!
//! Kernels are generic over [`Sample`] so they run on `f64` price data and
//! on `f32` where memory matters. A NaN sample marks a position with no
//! value; indicators turn NaN into an explicit undefined entry when they
//! build a [`Series`](crate::series::Series).

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A floating point sample in a price or indicator series.
///
/// # Example
///
/// ```
/// use stock_ta::traits::Sample;
///
/// fn average<T: Sample>(window: &[T]) -> stock_ta::Result<T> {
///     let total = window.iter().fold(T::zero(), |acc, &x| acc + x);
///     Ok(total / T::from_count(window.len())?)
/// }
///
/// assert_eq!(average(&[1.0_f64, 2.0, 6.0]).unwrap(), 3.0);
/// ```
pub trait Sample: Float + NumCast + Default + Send + Sync + 'static {
    /// Converts a window length or bar count into a sample.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `count` has no representation.
    #[inline]
    fn from_count(count: usize) -> Result<Self> {
        <Self as NumCast>::from(count).ok_or(Error::NumericConversion {
            context: "window length to sample",
        })
    }

    /// Exponential smoothing factor `2 / (span + 1)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if `span` has no representation.
    #[inline]
    fn smoothing(span: usize) -> Result<Self> {
        let two = Self::one() + Self::one();
        Ok(two / (Self::from_count(span)? + Self::one()))
    }
}

impl<T: Float + NumCast + Default + Send + Sync + 'static> Sample for T {}

/// Rejects a zero window length or span.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
#[inline]
pub const fn ensure_period(period: usize) -> Result<()> {
    match period {
        0 => Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        }),
        _ => Ok(()),
    }
}
