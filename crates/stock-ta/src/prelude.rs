//! Commonly used types and functions for convenient importing.
//!
//! # Usage
//!
//! ```
//! use stock_ta::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let bars = vec![Bar::new(date, 10.0, 11.0, 9.5, 10.5, 1_000.0)];
//!
//! let result = compute_indicators(&bars, ["MA", "RSI"]).unwrap();
//! assert_eq!(result.len(), 1);
//! ```

// Error types
pub use crate::error::{Error, Result, ValidationError};

// Data
pub use crate::data::{normalize, Bar, HistoryProvider, Interval, Lookback, MemoryProvider, PriceSeries};
pub use crate::series::Series;

// Configuration
pub use crate::config::{
    BollingerParams, EngineConfig, MacdParams, RsiParams, StochasticParams, UnknownIndicatorPolicy,
};

// Engine
pub use crate::analysis::{analyze, AnalysisReport, AnalysisRequest};
pub use crate::engine::{compute_indicators, Engine, IndicatorKind, IndicatorResult, NamedSeries};

// Indicator functions and multi-output types
pub use crate::indicators::{
    bollinger_bands, macd, moving_average, rsi, stochastic, BollingerOutput, MacdOutput,
    MovingAverages, StochasticOutput,
};
