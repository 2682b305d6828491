//! Stochastic Oscillator (slow variant).
//!
//! ```text
//! fastK = 100 * (close - LL(low, k_period)) / (HH(high, k_period) - LL(low, k_period))
//! slowK = SMA(fastK, k_smooth)
//! slowD = SMA(slowK, d_smooth)
//! ```
//!
//! The published pair is (`slowK`, `slowD`) under the keys `STOCH_K` and
//! `STOCH_D`. Highest-high and lowest-low use the monotonic-deque rolling
//! extrema.
//!
//! # Conventions
//!
//! - **Flat window**: when `HH == LL` the raw %K is undefined (0/0), and
//!   every smoothed value whose window covers it is undefined too.
//! - **Warm-up**: `slowK` is first defined at `k_period + k_smooth - 2` and
//!   `slowD` at `k_period + k_smooth + d_smooth - 3`, when the history is
//!   long enough.

use std::collections::BTreeMap;

use crate::data::{close_prices, high_prices, low_prices, Bar};
use crate::error::Result;
use crate::kernels::{rolling_max, rolling_mean, rolling_min};
use crate::series::Series;
use crate::traits::ensure_period;

/// Output key of smoothed %K.
pub const STOCH_K_KEY: &str = "STOCH_K";
/// Output key of %D.
pub const STOCH_D_KEY: &str = "STOCH_D";

/// Output of [`stochastic`].
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticOutput {
    /// Smoothed %K (slowK).
    pub k: Series,
    /// %D: the moving average of smoothed %K (slowD).
    pub d: Series,
}

impl StochasticOutput {
    /// Converts into a map keyed by output series name.
    #[must_use]
    pub fn into_named(self) -> BTreeMap<String, Series> {
        BTreeMap::from([
            (STOCH_K_KEY.to_string(), self.k),
            (STOCH_D_KEY.to_string(), self.d),
        ])
    }
}

/// Raw %K over `k_period` bars, NaN where undefined.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `k_period` is 0.
pub fn raw_k(high: &[f64], low: &[f64], close: &[f64], k_period: usize) -> Result<Vec<f64>> {
    let highest = rolling_max(high, k_period)?;
    let lowest = rolling_min(low, k_period)?;

    Ok(close
        .iter()
        .zip(highest.iter().zip(&lowest))
        .map(|(&c, (&hh, &ll))| {
            let range = hh - ll;
            // Also covers NaN extrema: NaN comparisons are false.
            if range > 0.0 {
                100.0 * (c - ll) / range
            } else {
                f64::NAN
            }
        })
        .collect())
}

/// Pins smoothed values to the oscillator's `[0, 100]` range; NaN stays NaN.
fn confine(values: Vec<f64>) -> Vec<f64> {
    values.into_iter().map(|v| v.clamp(0.0, 100.0)).collect()
}

/// Computes the slow stochastic oscillator.
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate};
/// use stock_ta::data::Bar;
/// use stock_ta::indicators::stochastic;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars: Vec<Bar> = (0..20)
///     .map(|i| {
///         let c = 10.0 + i as f64;
///         Bar::new(start + Days::new(i), c, c + 1.0, c - 1.0, c, 0.0)
///     })
///     .collect();
///
/// let out = stochastic(&bars, 14, 3, 3).unwrap();
/// assert_eq!(out.k.first_defined_index(), Some(15));
/// assert_eq!(out.d.first_defined_index(), Some(17));
/// ```
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if any window is 0.
pub fn stochastic(
    bars: &[Bar],
    k_period: usize,
    k_smooth: usize,
    d_smooth: usize,
) -> Result<StochasticOutput> {
    ensure_period(k_smooth)?;
    ensure_period(d_smooth)?;

    let fast_k = raw_k(
        &high_prices(bars),
        &low_prices(bars),
        &close_prices(bars),
        k_period,
    )?;
    let slow_k = confine(rolling_mean(&fast_k, k_smooth)?);
    let slow_d = confine(rolling_mean(&slow_k, d_smooth)?);

    Ok(StochasticOutput {
        k: Series::from_raw(slow_k),
        d: Series::from_raw(slow_d),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn bars(hlc: &[(f64, f64, f64)]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        hlc.iter()
            .enumerate()
            .map(|(i, &(h, l, c))| Bar::new(start + Days::new(i as u64), c, h, l, c, 1.0))
            .collect()
    }

    #[test]
    fn test_raw_k_known_values() {
        let high = [10.0, 12.0, 11.0];
        let low = [8.0, 9.0, 9.5];
        let close = [9.0, 11.0, 10.0];
        let k = raw_k(&high, &low, &close, 2).unwrap();
        assert!(k[0].is_nan());
        // HH 12, LL 8 -> (11 - 8) / 4
        assert_eq!(k[1], 75.0);
        // HH 12, LL 9 -> (10 - 9) / 3
        assert!((k[2] - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_raw_k_flat_window_is_undefined() {
        let k = raw_k(&[5.0; 4], &[5.0; 4], &[5.0; 4], 3).unwrap();
        assert!(k.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_stochastic_flat_prices_undefined() {
        let input = bars(&[(7.0, 7.0, 7.0); 25]);
        let out = stochastic(&input, 14, 3, 3).unwrap();
        assert_eq!(out.k.defined_count(), 0);
        assert_eq!(out.d.defined_count(), 0);
    }

    #[test]
    fn test_stochastic_close_at_high_is_100() {
        let hlc: Vec<_> = (0..20)
            .map(|i| {
                let c = 10.0 + f64::from(i);
                (c, c - 2.0, c)
            })
            .collect();
        let out = stochastic(&bars(&hlc), 5, 3, 3).unwrap();
        assert_eq!(out.k.first_defined_index(), Some(6));
        assert_eq!(out.d.first_defined_index(), Some(8));
        for i in 6..20 {
            assert_eq!(out.k.get(i), Some(100.0));
        }
    }

    #[test]
    fn test_stochastic_within_bounds() {
        let hlc: Vec<_> = (0..60)
            .map(|i| {
                let mid = 50.0 + (f64::from(i) * 0.4).sin() * 10.0;
                (mid + 1.5, mid - 1.5, mid + (f64::from(i) * 1.3).cos())
            })
            .collect();
        let out = stochastic(&bars(&hlc), 14, 3, 3).unwrap();
        for v in out.k.iter().chain(out.d.iter()).flatten() {
            assert!((0.0..=100.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_stochastic_short_windows_stay_within_bounds() {
        for seed in 0..300_u32 {
            let phase = f64::from(seed) * 0.618;
            let hlc: Vec<_> = (0..200)
                .map(|i| {
                    let t = f64::from(i);
                    let mid = 100.0 + (t * 0.31 + phase).sin() * 20.0 + (t * 1.7).cos() * 3.0;
                    let half = 0.5 + ((t + phase) * 0.9).sin().abs() * 2.0;
                    let close = mid + half * (t * 2.3 + phase).sin();
                    (mid + half, mid - half, close)
                })
                .collect();
            let out = stochastic(&bars(&hlc), 5, 3, 3).unwrap();
            for v in out.k.iter().chain(out.d.iter()).flatten() {
                assert!((0.0..=100.0).contains(&v), "seed {seed}: {v}");
            }
        }
    }

    #[test]
    fn test_confine_keeps_nan_and_clamps() {
        let out = confine(vec![f64::NAN, -1e-14, 50.0, 100.00000000000003]);
        assert!(out[0].is_nan());
        assert_eq!(&out[1..], &[0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_stochastic_flat_stretch_recovers() {
        let mut hlc = vec![(5.0, 5.0, 5.0); 5];
        hlc.extend((0..10).map(|i| {
            let c = 6.0 + f64::from(i);
            (c + 1.0, c - 1.0, c)
        }));
        let out = stochastic(&bars(&hlc), 3, 2, 2).unwrap();
        // Windows fully inside the flat stretch are undefined.
        assert_eq!(out.k.get(4), None);
        assert!(out.k.get(14).is_some());
        assert!(out.d.get(14).is_some());
    }

    #[test]
    fn test_stochastic_keys() {
        let out = stochastic(&bars(&[(2.0, 1.0, 1.5); 3]), 2, 1, 1).unwrap();
        let named = out.into_named();
        assert!(named.contains_key("STOCH_K"));
        assert!(named.contains_key("STOCH_D"));
    }

    #[test]
    fn test_stochastic_zero_windows() {
        let input = bars(&[(2.0, 1.0, 1.5); 5]);
        assert!(stochastic(&input, 0, 3, 3).is_err());
        assert!(stochastic(&input, 3, 0, 3).is_err());
        assert!(stochastic(&input, 3, 3, 0).is_err());
    }
}
