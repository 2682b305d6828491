//! Indicator engine: name resolution, per-indicator dispatch and the combined
//! result.
//!
//! The engine normalizes the bars once, resolves the requested names to
//! [`IndicatorKind`]s, then computes each indicator independently. A failure
//! in one indicator is recorded in [`IndicatorResult::failures`] and does not
//! prevent the others from being returned. Malformed input, by contrast,
//! aborts the whole computation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{EngineConfig, UnknownIndicatorPolicy, MA_PERIODS};
use crate::data::{normalize, Bar, PriceSeries};
use crate::error::{Error, Result};
use crate::indicators::bollinger::{BBANDS_LOWER_KEY, BBANDS_MIDDLE_KEY, BBANDS_UPPER_KEY};
use crate::indicators::ma::ma_key;
use crate::indicators::macd::{MACD_HIST_KEY, MACD_KEY, MACD_SIGNAL_KEY};
use crate::indicators::rsi::RSI_KEY;
use crate::indicators::stochastic::{STOCH_D_KEY, STOCH_K_KEY};
use crate::indicators::{bollinger_bands, macd, moving_average, rsi, stochastic};
use crate::series::Series;

/// Output series of one indicator, keyed by series name.
pub type NamedSeries = BTreeMap<String, Series>;

/// The indicators the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorKind {
    /// Simple moving averages over 5, 10, 20 and 60 bars.
    #[serde(rename = "MA")]
    MovingAverage,
    /// Relative Strength Index.
    #[serde(rename = "RSI")]
    Rsi,
    /// Moving Average Convergence Divergence.
    #[serde(rename = "MACD")]
    Macd,
    /// Bollinger Bands.
    #[serde(rename = "BBANDS")]
    Bollinger,
    /// Slow stochastic oscillator.
    #[serde(rename = "STOCH")]
    Stochastic,
}

impl IndicatorKind {
    /// All indicators, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::MovingAverage,
        Self::Rsi,
        Self::Macd,
        Self::Bollinger,
        Self::Stochastic,
    ];

    /// Returns the indicator's request name, e.g. `"BBANDS"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MovingAverage => "MA",
            Self::Rsi => "RSI",
            Self::Macd => "MACD",
            Self::Bollinger => "BBANDS",
            Self::Stochastic => "STOCH",
        }
    }

    /// Returns the names of the series this indicator produces.
    #[must_use]
    pub fn series_keys(self) -> Vec<String> {
        match self {
            Self::MovingAverage => MA_PERIODS.iter().map(|&p| ma_key(p)).collect(),
            Self::Rsi => vec![RSI_KEY.to_string()],
            Self::Macd => [MACD_KEY, MACD_SIGNAL_KEY, MACD_HIST_KEY]
                .map(String::from)
                .to_vec(),
            Self::Bollinger => [BBANDS_UPPER_KEY, BBANDS_MIDDLE_KEY, BBANDS_LOWER_KEY]
                .map(String::from)
                .to_vec(),
            Self::Stochastic => [STOCH_K_KEY, STOCH_D_KEY].map(String::from).to_vec(),
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = Error;

    /// Parses a request name. Matching ignores case and surrounding spaces.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidParameter {
                name: "indicator".to_string(),
                reason: format!("unknown indicator '{s}'"),
            })
    }
}

/// Combined output of an indicator computation.
///
/// Every series in `indicators` has exactly `dates.len()` positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorResult {
    /// Date axis shared by all series.
    pub dates: Vec<NaiveDate>,
    /// Series per indicator name, e.g. `indicators["MACD"]["MACD_signal"]`.
    pub indicators: BTreeMap<String, NamedSeries>,
    /// Indicators that failed, with the failure message.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<String, String>,
}

impl IndicatorResult {
    /// Number of positions on the date axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the date axis is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns all series of one indicator.
    #[must_use]
    pub fn get(&self, indicator: IndicatorKind) -> Option<&NamedSeries> {
        self.indicators.get(indicator.name())
    }

    /// Returns a single series, e.g. `series(IndicatorKind::Macd, "MACD_hist")`.
    #[must_use]
    pub fn series(&self, indicator: IndicatorKind, key: &str) -> Option<&Series> {
        self.get(indicator).and_then(|named| named.get(key))
    }

    /// Keeps only the positions dated within `[start, end]` (inclusive).
    ///
    /// Either bound may be open. An inverted range yields an empty result.
    /// Failures are kept unchanged.
    #[must_use]
    pub fn restrict(self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let lo = start.map_or(0, |s| self.dates.partition_point(|d| *d < s));
        let hi = end.map_or(self.dates.len(), |e| self.dates.partition_point(|d| *d <= e));
        let range = lo..hi.max(lo);

        if range == (0..self.dates.len()) {
            return self;
        }

        let indicators = self
            .indicators
            .into_iter()
            .map(|(name, named)| {
                let named = named
                    .into_iter()
                    .map(|(key, series)| (key, series.slice(range.clone())))
                    .collect();
                (name, named)
            })
            .collect();

        Self {
            dates: self.dates[range].to_vec(),
            indicators,
            failures: self.failures,
        }
    }
}

/// Computes indicators under a fixed [`EngineConfig`].
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate};
/// use stock_ta::data::Bar;
/// use stock_ta::engine::{Engine, IndicatorKind};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars: Vec<Bar> = (0..30)
///     .map(|i| {
///         let c = 100.0 + i as f64;
///         Bar::new(start + Days::new(i), c, c + 1.0, c - 1.0, c, 1_000.0)
///     })
///     .collect();
///
/// let result = Engine::default().compute(&bars, ["RSI", "MACD"]).unwrap();
/// assert_eq!(result.len(), 30);
/// assert_eq!(result.series(IndicatorKind::Rsi, "RSI").unwrap().get(29), Some(100.0));
/// assert!(result.get(IndicatorKind::Bollinger).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves request names to indicators.
    ///
    /// Duplicates are dropped, keeping first-occurrence order. Unknown names
    /// are skipped with a warning, or rejected when the configuration says so.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for an unknown name under
    /// [`UnknownIndicatorPolicy::Reject`].
    pub fn resolve<I, S>(&self, names: I) -> Result<Vec<IndicatorKind>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kinds = Vec::new();
        for name in names {
            let name = name.as_ref();
            match name.parse::<IndicatorKind>() {
                Ok(kind) if kinds.contains(&kind) => {
                    debug!(indicator = %kind, "ignoring duplicate indicator request");
                }
                Ok(kind) => kinds.push(kind),
                Err(err) => match self.config.unknown_indicators {
                    UnknownIndicatorPolicy::Ignore => {
                        warn!(name, "skipping unknown indicator");
                    }
                    UnknownIndicatorPolicy::Reject => return Err(err),
                },
            }
        }
        Ok(kinds)
    }

    /// Normalizes `bars` and computes the named indicators.
    ///
    /// # Errors
    ///
    /// - `Error::Validation` if the bars are empty or malformed
    /// - `Error::InvalidParameter` for an unknown name under
    ///   [`UnknownIndicatorPolicy::Reject`]
    ///
    /// Failures of individual indicators are not errors; see
    /// [`IndicatorResult::failures`].
    pub fn compute<I, S>(&self, bars: &[Bar], names: I) -> Result<IndicatorResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = self.resolve(names)?;
        let series = normalize(bars.to_vec())?;
        Ok(self.compute_normalized(&series, &kinds))
    }

    /// Computes indicators over an already normalized series.
    #[must_use]
    pub fn compute_normalized(&self, series: &PriceSeries, kinds: &[IndicatorKind]) -> IndicatorResult {
        let mut result = IndicatorResult {
            dates: series.dates(),
            ..IndicatorResult::default()
        };

        for &kind in kinds {
            match self.compute_one(kind, series) {
                Ok(named) => {
                    debug!(indicator = %kind, series = named.len(), "computed indicator");
                    result.indicators.insert(kind.name().to_string(), named);
                }
                Err(err) => {
                    warn!(indicator = %kind, error = %err, "indicator failed");
                    result.failures.insert(kind.name().to_string(), err.to_string());
                }
            }
        }

        result
    }

    fn compute_one(&self, kind: IndicatorKind, bars: &[Bar]) -> Result<NamedSeries> {
        let config = &self.config;
        match kind {
            IndicatorKind::MovingAverage => moving_average(bars).map(|ma| ma.into_named()),
            IndicatorKind::Rsi => {
                rsi(bars, config.rsi.period).map(|s| NamedSeries::from([(RSI_KEY.to_string(), s)]))
            }
            IndicatorKind::Macd => {
                let p = config.macd;
                macd(bars, p.fast, p.slow, p.signal).map(|out| out.into_named())
            }
            IndicatorKind::Bollinger => {
                let p = config.bollinger;
                bollinger_bands(bars, p.period, p.dev_up, p.dev_down).map(|out| out.into_named())
            }
            IndicatorKind::Stochastic => {
                let p = config.stochastic;
                stochastic(bars, p.k_period, p.k_smooth, p.d_smooth).map(|out| out.into_named())
            }
        }
    }
}

/// Computes the named indicators with the default configuration.
///
/// # Errors
///
/// Returns `Error::Validation` if `bars` is empty or malformed.
pub fn compute_indicators<I, S>(bars: &[Bar], names: I) -> Result<IndicatorResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Engine::default().compute(bars, names)
}
