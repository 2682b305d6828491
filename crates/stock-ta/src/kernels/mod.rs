//! Numeric kernels shared by the indicators.
//!
//! # Kernels
//!
//! - [`rolling_stats`]: rolling mean and population standard deviation
//!   (computed from each literal window)
//! - [`rolling_extrema`]: monotonic queue for O(n) rolling max/min
//! - [`ema`]: exponential smoothing, defined from the first sample
//!
//! All kernels return an output of the same length as their input. Rolling
//! kernels leave a NaN warm-up prefix of `period - 1` samples and return an
//! all-NaN output when the window is longer than the input.

pub mod ema;
pub mod rolling_extrema;
pub mod rolling_stats;

pub use ema::{ema, ema_alpha};
pub use rolling_extrema::{rolling_max, rolling_min, Extremum, RollingExtremum};
pub use rolling_stats::{rolling_mean, rolling_moments, rolling_std_dev, RollingMoments, WindowStat};
