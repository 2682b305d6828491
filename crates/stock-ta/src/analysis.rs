//! Symbol-level analysis: fetch history from a provider, compute indicators,
//! restrict the output to the requested date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::data::{HistoryProvider, Interval, Lookback};
use crate::engine::{Engine, IndicatorResult};
use crate::error::{Error, Result};

/// An analysis request for one symbol.
///
/// Deserializes from JSON such as
/// `{"symbol": "AAPL", "indicators": ["MA", "RSI"], "start_date": "2024-01-02"}`;
/// every field but `symbol` and `indicators` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Ticker symbol.
    pub symbol: String,
    /// Requested indicator names.
    pub indicators: Vec<String>,
    /// First date to report, inclusive.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last date to report, inclusive.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// History to fetch from the provider.
    #[serde(default)]
    pub lookback: Lookback,
    /// Bar size of the fetched history.
    #[serde(default)]
    pub interval: Interval,
}

impl AnalysisRequest {
    /// Creates a request over one year of daily history with no date range.
    pub fn new<I, S>(symbol: impl Into<String>, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbol: symbol.into(),
            indicators: indicators.into_iter().map(Into::into).collect(),
            start_date: None,
            end_date: None,
            lookback: Lookback::default(),
            interval: Interval::default(),
        }
    }

    /// Sets the reported date range.
    #[must_use]
    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Sets the history lookback.
    #[must_use]
    pub fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// Sets the bar interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }
}

/// Result of [`analyze`]: the symbol plus the indicator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Ticker symbol as requested.
    pub symbol: String,
    /// Indicator output, restricted to the requested range.
    #[serde(flatten)]
    pub result: IndicatorResult,
}

/// Runs an analysis request against a history provider.
///
/// Indicators are computed over the full fetched history and only then
/// restricted to `[start_date, end_date]`, so values at the start of the
/// range already have their warm-up behind them.
///
/// # Errors
///
/// - `Error::InvalidParameter` if the symbol is blank, or an unknown
///   indicator is rejected by the engine configuration
/// - `Error::NotFound` / `Error::Provider` from the provider
/// - `Error::Validation` if the fetched bars are malformed
#[instrument(skip_all, fields(symbol = %request.symbol))]
pub fn analyze<P>(provider: &P, request: &AnalysisRequest, engine: &Engine) -> Result<AnalysisReport>
where
    P: HistoryProvider + ?Sized,
{
    let symbol = request.symbol.trim();
    if symbol.is_empty() {
        return Err(Error::InvalidParameter {
            name: "symbol".to_string(),
            reason: "symbol must not be empty".to_string(),
        });
    }

    let kinds = engine.resolve(&request.indicators)?;
    let bars = provider.fetch_history(symbol, request.lookback, request.interval)?;
    let series = crate::data::normalize(bars)?;
    let result = engine
        .compute_normalized(&series, &kinds)
        .restrict(request.start_date, request.end_date);

    info!(
        bars = series.len(),
        reported = result.len(),
        indicators = result.indicators.len(),
        failures = result.failures.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        symbol: symbol.to_string(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, MemoryProvider};
    use crate::engine::IndicatorKind;
    use chrono::Days;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn provider() -> MemoryProvider {
        let start = ymd(2024, 1, 1);
        let bars = (0..90_u32)
            .map(|i| {
                let c = 50.0 + f64::from(i % 7);
                Bar::new(start + Days::new(u64::from(i)), c, c + 2.0, c - 2.0, c, 500.0)
            })
            .collect();
        let mut provider = MemoryProvider::new();
        provider.insert("ACME", bars);
        provider
    }

    #[test]
    fn test_request_from_json() {
        let request: AnalysisRequest = serde_json::from_str(
            r#"{"symbol":"ACME","indicators":["MA"],"end_date":"2024-02-01","interval":"1wk"}"#,
        )
        .unwrap();
        assert_eq!(request.start_date, None);
        assert_eq!(request.end_date, Some(ymd(2024, 2, 1)));
        assert_eq!(request.lookback, Lookback::OneYear);
        assert_eq!(request.interval, Interval::Weekly);
    }

    #[test]
    fn test_analyze_full_history() {
        let request = AnalysisRequest::new("acme", ["MA", "STOCH"]);
        let report = analyze(&provider(), &request, &Engine::default()).unwrap();
        assert_eq!(report.symbol, "acme");
        assert_eq!(report.result.len(), 90);
        assert!(report.result.get(IndicatorKind::Stochastic).is_some());
    }

    #[test]
    fn test_analyze_range_keeps_warm_up_behind() {
        let request = AnalysisRequest::new("ACME", ["MA"])
            .with_range(Some(ymd(2024, 3, 1)), Some(ymd(2024, 3, 10)));
        let report = analyze(&provider(), &request, &Engine::default()).unwrap();
        assert_eq!(report.result.len(), 10);
        // MA20 is already defined on the first reported day.
        let ma20 = report.result.series(IndicatorKind::MovingAverage, "MA20").unwrap();
        assert!(ma20.get(0).is_some());
    }

    #[test]
    fn test_analyze_unknown_symbol() {
        let request = AnalysisRequest::new("NOPE", ["MA"]);
        let err = analyze(&provider(), &request, &Engine::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_analyze_blank_symbol() {
        let request = AnalysisRequest::new("  ", ["MA"]);
        assert!(matches!(
            analyze(&provider(), &request, &Engine::default()),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_report_json_is_flat() {
        let request = AnalysisRequest::new("ACME", ["RSI"]).with_lookback(Lookback::FiveDays);
        let report = analyze(&provider(), &request, &Engine::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["symbol"], "ACME");
        assert_eq!(json["dates"].as_array().unwrap().len(), 5);
        assert!(json["indicators"]["RSI"]["RSI"].is_array());
    }
}
