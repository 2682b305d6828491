//! Rolling highest-high / lowest-low over a trailing window.
//!
//! A [`RollingExtremum`] keeps a monotonic queue of `(index, value)` pairs:
//! decreasing values for a maximum, increasing for a minimum. Each sample is
//! pushed and popped at most once, so a full pass is O(n) regardless of the
//! window length.
//!
//! Output length equals input length. Positions `i < period - 1` are NaN, and
//! a window longer than the input gives an all-NaN output rather than an
//! error. A window holding a NaN sample is NaN: its extremum is unknown.
//!
//! ```
//! use stock_ta::kernels::rolling_extrema::{rolling_max, rolling_min};
//!
//! let highs = [3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
//!
//! let hh = rolling_max(&highs, 3).unwrap();
//! assert_eq!(hh[2], 4.0);
//! assert_eq!(hh[5], 9.0);
//!
//! let ll = rolling_min(&highs, 3).unwrap();
//! assert_eq!(ll[2], 1.0);
//! assert_eq!(ll[6], 2.0);
//! ```

use std::collections::VecDeque;

use crate::error::Result;
use crate::traits::{ensure_period, Sample};

/// Which end of the window to track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Highest value in the window.
    Max,
    /// Lowest value in the window.
    Min,
}

impl Extremum {
    /// True if `incoming` makes `queued` unable to ever be the extremum again.
    #[inline]
    fn supersedes<T: Sample>(self, incoming: T, queued: T) -> bool {
        match self {
            Self::Max => incoming >= queued,
            Self::Min => incoming <= queued,
        }
    }
}

/// Streaming extremum of the last `period` samples.
///
/// ```
/// use stock_ta::kernels::rolling_extrema::{Extremum, RollingExtremum};
///
/// let mut lowest = RollingExtremum::new(2, Extremum::Min);
/// assert!(lowest.push(4.0_f64).is_nan());
/// assert_eq!(lowest.push(6.0), 4.0);
/// assert_eq!(lowest.push(5.0), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct RollingExtremum<T> {
    kind: Extremum,
    period: usize,
    queue: VecDeque<(usize, T)>,
    /// Index of the next sample.
    next: usize,
    /// Index of the most recent NaN sample.
    last_nan: Option<usize>,
}

impl<T: Sample> RollingExtremum<T> {
    /// Creates an empty window of `period` samples.
    #[must_use]
    pub fn new(period: usize, kind: Extremum) -> Self {
        Self {
            kind,
            period,
            queue: VecDeque::with_capacity(period),
            next: 0,
            last_nan: None,
        }
    }

    /// Window length.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Adds a sample and returns the extremum of the window ending at it,
    /// or NaN while the window is incomplete or holds a NaN.
    pub fn push(&mut self, value: T) -> T {
        let index = self.next;
        self.next += 1;

        if value.is_nan() {
            self.last_nan = Some(index);
        } else {
            while self
                .queue
                .back()
                .is_some_and(|&(_, queued)| self.kind.supersedes(value, queued))
            {
                self.queue.pop_back();
            }
            self.queue.push_back((index, value));
        }

        if self.next < self.period {
            return T::nan();
        }
        let window_start = self.next - self.period;
        while self.queue.front().is_some_and(|&(i, _)| i < window_start) {
            self.queue.pop_front();
        }

        match (self.last_nan, self.queue.front()) {
            (Some(nan_at), _) if nan_at >= window_start => T::nan(),
            (_, Some(&(_, extremum))) => extremum,
            _ => T::nan(),
        }
    }
}

/// Rolling maximum over a trailing window of `period` samples.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// ```
/// use stock_ta::kernels::rolling_extrema::rolling_max;
///
/// let result = rolling_max(&[1.0_f64, 3.0, 2.0, 5.0, 4.0], 3).unwrap();
/// assert!(result[1].is_nan());
/// assert_eq!(&result[2..], &[3.0, 5.0, 5.0]);
/// ```
pub fn rolling_max<T: Sample>(data: &[T], period: usize) -> Result<Vec<T>> {
    rolling_extremum(data, period, Extremum::Max)
}

/// Rolling minimum over a trailing window of `period` samples.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn rolling_min<T: Sample>(data: &[T], period: usize) -> Result<Vec<T>> {
    rolling_extremum(data, period, Extremum::Min)
}

fn rolling_extremum<T: Sample>(data: &[T], period: usize, kind: Extremum) -> Result<Vec<T>> {
    ensure_period(period)?;
    if period > data.len() {
        return Ok(vec![T::nan(); data.len()]);
    }

    let mut window = RollingExtremum::new(period, kind);
    Ok(data.iter().map(|&x| window.push(x)).collect())
}
