//! Rolling mean and population standard deviation over a trailing window.
//!
//! # Algorithm
//!
//! Every defined position is computed from its literal window, never from a
//! running update, so no rounding error is carried over from samples that
//! have already left the window. Samples are shifted by the window's first
//! value before summing:
//!
//! ```text
//! a        = x[i + 1 - w]
//! mean     = a + sum(x - a) / w
//! m2       = sum((x - mean)^2)
//! variance = m2 / w          (population, not sample)
//! ```
//!
//! A constant window therefore has a mean equal to the constant and a
//! standard deviation of exactly 0. The cost is O(n * w), with `w` at most a
//! few dozen bars for the indicators built on it.
//!
//! # Warm-up and missing values
//!
//! Positions `i < w - 1` are NaN, and `w > n` yields an all-NaN output. A
//! window containing a NaN sample yields NaN.

use num_traits::Float;

use crate::error::Result;
use crate::traits::{ensure_period, Sample};

/// Mean and squared deviation of one complete window.
///
/// # Example
///
/// ```
/// use stock_ta::kernels::rolling_stats::WindowStat;
///
/// let stat = WindowStat::from_window(&[0.05_f64, 0.05, 0.05]).unwrap();
/// assert_eq!(stat.mean(), 0.05);
/// assert_eq!(stat.std_dev(), 0.0);
///
/// let stat = WindowStat::from_window(&[2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert_eq!(stat.mean(), 5.0);
/// assert_eq!(stat.std_dev(), 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WindowStat<T> {
    len: T,
    mean: T,
    m2: T,
}

impl<T: Sample> WindowStat<T> {
    /// Computes the statistics of `window`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` for an empty window, or
    /// `Error::NumericConversion` if the length is not representable in `T`.
    pub fn from_window(window: &[T]) -> Result<Self> {
        ensure_period(window.len())?;
        let len = T::from_count(window.len())?;

        let anchor = window[0];
        let shifted = window.iter().fold(T::zero(), |acc, &x| acc + (x - anchor));
        let mean = anchor + shifted / len;
        let m2 = window.iter().fold(T::zero(), |acc, &x| {
            let d = x - mean;
            acc + d * d
        });

        Ok(Self { len, mean, m2 })
    }

    /// Returns the window mean.
    #[inline]
    #[must_use]
    pub fn mean(&self) -> T {
        self.mean
    }

    /// Returns the population variance of the window.
    #[inline]
    #[must_use]
    pub fn variance(&self) -> T {
        self.m2 / self.len
    }

    /// Returns the population standard deviation of the window.
    #[inline]
    #[must_use]
    pub fn std_dev(&self) -> T {
        Float::sqrt(self.variance())
    }
}

/// Rolling mean and standard deviation computed in one pass.
#[derive(Debug, Clone)]
pub struct RollingMoments<T> {
    /// Rolling arithmetic mean.
    pub mean: Vec<T>,
    /// Rolling population standard deviation.
    pub std_dev: Vec<T>,
}

/// Computes the rolling mean over a trailing window of `period` samples.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use stock_ta::kernels::rolling_stats::rolling_mean;
///
/// let result = rolling_mean(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert!(result[1].is_nan());
/// assert_eq!(result[2], 2.0);
/// assert_eq!(result[4], 4.0);
/// ```
pub fn rolling_mean<T: Sample>(data: &[T], period: usize) -> Result<Vec<T>> {
    rolling_moments(data, period).map(|m| m.mean)
}

/// Computes the rolling population standard deviation (divide by `period`).
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use stock_ta::kernels::rolling_stats::rolling_std_dev;
///
/// let result = rolling_std_dev(&[1.0_f64, 2.0, 3.0], 3).unwrap();
/// // Population standard deviation of [1, 2, 3] = sqrt(2/3)
/// assert!((result[2] - (2.0_f64 / 3.0).sqrt()).abs() < 1e-12);
/// ```
pub fn rolling_std_dev<T: Sample>(data: &[T], period: usize) -> Result<Vec<T>> {
    rolling_moments(data, period).map(|m| m.std_dev)
}

/// Computes rolling mean and population standard deviation together.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn rolling_moments<T: Sample>(data: &[T], period: usize) -> Result<RollingMoments<T>> {
    ensure_period(period)?;

    let n = data.len();
    let mut mean = vec![T::nan(); n];
    let mut std_dev = vec![T::nan(); n];
    if period > n {
        return Ok(RollingMoments { mean, std_dev });
    }

    let mut nan_count = 0usize;
    for i in 0..n {
        if data[i].is_nan() {
            nan_count += 1;
        }
        if i >= period && data[i - period].is_nan() {
            nan_count -= 1;
        }
        if i + 1 < period || nan_count > 0 {
            continue;
        }

        let stat = WindowStat::from_window(&data[i + 1 - period..=i])?;
        mean[i] = stat.mean();
        std_dev[i] = stat.std_dev();
    }

    Ok(RollingMoments { mean, std_dev })
}
