//! stock-ta: technical indicators over daily stock price history
//!
//! This crate validates a sequence of daily OHLCV bars and computes a fixed
//! family of technical indicators over it: moving averages, RSI, MACD,
//! Bollinger Bands and the stochastic oscillator. Every output series is
//! aligned one-to-one with the input dates; positions where an indicator has
//! no value are undefined (`None`, serialized as JSON `null`) rather than
//! errors.
//!
//! # Quick Start
//!
//! ```
//! use chrono::{Days, NaiveDate};
//! use stock_ta::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let bars: Vec<Bar> = (1..=16u32)
//!     .map(|i| {
//!         let c = f64::from(i);
//!         Bar::new(start + Days::new(u64::from(i)), c, c + 0.5, c - 0.5, c, 100.0)
//!     })
//!     .collect();
//!
//! let result = compute_indicators(&bars, ["MA", "RSI"]).unwrap();
//! let rsi = result.series(IndicatorKind::Rsi, "RSI").unwrap();
//!
//! // Undefined until the window is full, then 100 for a strictly rising close.
//! assert_eq!(rsi.get(12), None);
//! assert_eq!(rsi.get(13), Some(100.0));
//! ```
//!
//! # Indicators
//!
//! - `MA`: simple moving averages `MA5`, `MA10`, `MA20`, `MA60`
//! - `RSI`: relative strength index over simple rolling means
//! - `MACD`: `MACD`, `MACD_signal`, `MACD_hist`
//! - `BBANDS`: `BBANDS_upper`, `BBANDS_middle`, `BBANDS_lower`
//! - `STOCH`: slow stochastic `STOCH_K`, `STOCH_D`
//!
//! # Error Handling
//!
//! Malformed input aborts the computation with [`Error::Validation`]:
//!
//! ```
//! use stock_ta::prelude::*;
//!
//! let err = compute_indicators(&[], ["MA"]).unwrap_err();
//! assert!(err.is_validation());
//! ```
//!
//! A failure inside one indicator (for example a zero period in the
//! configuration) is reported in [`IndicatorResult::failures`](engine::IndicatorResult)
//! while the other requested indicators are still returned.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber;
//! binaries choose where the events go.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod kernels;
pub mod prelude;
pub mod series;
pub mod traits;

pub use error::{Error, Result};
