//! Indicator parameters and engine configuration.
//!
//! Every tunable lives in an explicit parameter struct that is passed to the
//! engine; nothing is read from ambient global state. All structs carry
//! `#[serde(default)]`, so a configuration file only needs the fields it
//! overrides.
//!
//! ```json
//! {
//!   "rsi": { "period": 21 },
//!   "bollinger": { "dev_up": 2.5 },
//!   "unknown_indicators": "reject"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Moving-average periods. Fixed; not caller-configurable.
pub const MA_PERIODS: [usize; 4] = [5, 10, 20, 60];

/// Default RSI period.
pub const RSI_DEFAULT_PERIOD: usize = 14;

/// RSI parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    /// Averaging window for gains and losses.
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: RSI_DEFAULT_PERIOD,
        }
    }
}

/// MACD parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    /// Span of the fast EMA.
    pub fast: usize,
    /// Span of the slow EMA.
    pub slow: usize,
    /// Span of the signal-line EMA.
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// Bollinger Band parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    /// Window of the middle band and standard deviation.
    pub period: usize,
    /// Standard deviations above the middle band.
    pub dev_up: f64,
    /// Standard deviations below the middle band.
    pub dev_down: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            dev_up: 2.0,
            dev_down: 2.0,
        }
    }
}

/// Stochastic oscillator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticParams {
    /// Highest-high / lowest-low lookback for raw %K.
    pub k_period: usize,
    /// Smoothing window applied to raw %K.
    pub k_smooth: usize,
    /// Smoothing window applied to smoothed %K to obtain %D.
    pub d_smooth: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k_period: 14,
            k_smooth: 3,
            d_smooth: 3,
        }
    }
}

/// What to do with indicator names the engine does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownIndicatorPolicy {
    /// Skip the name and log a warning.
    #[default]
    Ignore,
    /// Fail the whole request with `Error::InvalidParameter`.
    Reject,
}

/// Full engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RSI parameters.
    pub rsi: RsiParams,
    /// MACD parameters.
    pub macd: MacdParams,
    /// Bollinger Band parameters.
    pub bollinger: BollingerParams,
    /// Stochastic oscillator parameters.
    pub stochastic: StochasticParams,
    /// Handling of unrecognised indicator names.
    pub unknown_indicators: UnknownIndicatorPolicy,
}

impl EngineConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or is not valid JSON
    /// for this structure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_error = |message: String| Error::Config {
            path: path.display().to_string(),
            message,
        };

        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))?;
        debug!(path = %path.display(), ?config, "loaded engine configuration");
        Ok(config)
    }
}
