//! Shared test utilities for stock-ta tests.
//!
//! This module provides common utilities used across multiple test files.

use chrono::{Days, NaiveDate};
use stock_ta::data::Bar;
use stock_ta::series::Series;

/// Approximate equality check for floating-point values.
///
/// Handles NaN values specially - two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// First trading day used by the fixture builders.
#[allow(dead_code)]
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

/// Builds consecutive daily bars whose open, high, low and close all equal the given close.
#[allow(dead_code)]
pub fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start_date() + Days::new(i as u64), c, c, c, c, 1_000.0))
        .collect()
}

/// Builds consecutive daily bars from `(high, low, close)` triples; open equals close.
#[allow(dead_code)]
pub fn bars_from_hlc(hlc: &[(f64, f64, f64)]) -> Vec<Bar> {
    hlc.iter()
        .enumerate()
        .map(|(i, &(h, l, c))| Bar::new(start_date() + Days::new(i as u64), c, h, l, c, 1_000.0))
        .collect()
}

/// A deterministic, wavy OHLC history of `n` bars.
#[allow(dead_code)]
pub fn sample_bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + (t * 0.21).sin() * 8.0 + t * 0.05;
            let spread = 1.0 + (t * 0.37).cos().abs();
            Bar::new(
                start_date() + Days::new(i as u64),
                close - 0.3,
                close + spread,
                close - spread,
                close,
                10_000.0 + t,
            )
        })
        .collect()
}

/// Index of the first defined position, asserting that every earlier one is undefined.
#[allow(dead_code)]
pub fn warm_up_len(series: &Series) -> usize {
    let first = series.first_defined_index().unwrap_or(series.len());
    assert!(series.values()[..first].iter().all(Option::is_none));
    first
}
