//! Lookback windows and bar intervals for price history requests.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bar::Bar;
use crate::error::Error;

/// How much history to request, measured back from the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lookback {
    /// The last trading day.
    #[serde(rename = "1d")]
    OneDay,
    /// The last five trading days.
    #[serde(rename = "5d")]
    FiveDays,
    /// One calendar month.
    #[serde(rename = "1mo")]
    OneMonth,
    /// Three calendar months.
    #[serde(rename = "3mo")]
    ThreeMonths,
    /// Six calendar months.
    #[serde(rename = "6mo")]
    SixMonths,
    /// One calendar year.
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    /// Two calendar years.
    #[serde(rename = "2y")]
    TwoYears,
    /// Five calendar years.
    #[serde(rename = "5y")]
    FiveYears,
    /// Ten calendar years.
    #[serde(rename = "10y")]
    TenYears,
    /// Since January 1st of the most recent bar's year.
    #[serde(rename = "ytd")]
    YearToDate,
    /// Everything available.
    #[serde(rename = "max")]
    Max,
}

impl Lookback {
    /// All variants, in increasing length.
    pub const ALL: [Self; 11] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::TwoYears,
        Self::FiveYears,
        Self::TenYears,
        Self::YearToDate,
        Self::Max,
    ];

    /// Returns the short code, e.g. `"1y"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }

    const fn months(self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::TwoYears => Some(24),
            Self::FiveYears => Some(60),
            Self::TenYears => Some(120),
            _ => None,
        }
    }

    /// Keeps the trailing part of a chronologically sorted history.
    ///
    /// Day-based lookbacks count trading bars; month and year lookbacks keep
    /// bars dated strictly after the same calendar day N months earlier.
    #[must_use]
    pub fn trim(self, bars: &[Bar]) -> &[Bar] {
        let Some(last) = bars.last() else {
            return bars;
        };

        let keep_from = match self {
            Self::OneDay => bars.len() - 1,
            Self::FiveDays => bars.len().saturating_sub(5),
            Self::Max => 0,
            Self::YearToDate => bars.partition_point(|b| b.date.year() < last.date.year()),
            months => {
                let cutoff = months
                    .months()
                    .and_then(|m| last.date.checked_sub_months(Months::new(m)));
                match cutoff {
                    Some(cutoff) => bars.partition_point(|b| b.date <= cutoff),
                    None => 0,
                }
            }
        };

        &bars[keep_from..]
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lookback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == wanted)
            .ok_or_else(|| Error::InvalidParameter {
                name: "lookback".to_string(),
                reason: format!("unsupported lookback '{s}'"),
            })
    }
}

/// Bar size of a price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    /// One bar per trading day.
    #[default]
    #[serde(rename = "1d")]
    Daily,
    /// One bar per ISO week.
    #[serde(rename = "1wk")]
    Weekly,
    /// One bar per calendar month.
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    /// Returns the short code, e.g. `"1wk"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }

    fn bucket(self, date: NaiveDate) -> (i32, u32) {
        match self {
            Self::Daily => (date.year(), date.ordinal()),
            Self::Weekly => {
                let week = date.iso_week();
                (week.year(), week.week())
            }
            Self::Monthly => (date.year(), date.month()),
        }
    }

    /// Aggregates chronologically sorted daily bars into this interval.
    ///
    /// Bars are expected to be validated and unique per date already; see
    /// [`select_window`](super::select_window).
    ///
    /// Each output bar takes the first open, highest high, lowest low, last
    /// close and adjusted close, and total volume of its bucket, and is dated
    /// on the bucket's first trading day. `Daily` returns the input unchanged.
    #[must_use]
    pub fn resample(self, bars: &[Bar]) -> Vec<Bar> {
        if self == Self::Daily {
            return bars.to_vec();
        }

        let mut out: Vec<Bar> = Vec::new();
        let mut current_key = None;
        for bar in bars {
            let key = self.bucket(bar.date);
            match out.last_mut() {
                Some(agg) if current_key == Some(key) => {
                    agg.high = agg.high.max(bar.high);
                    agg.low = agg.low.min(bar.low);
                    agg.close = bar.close;
                    agg.adjusted_close = bar.adjusted_close;
                    agg.volume += bar.volume;
                }
                _ => {
                    out.push(*bar);
                    current_key = Some(key);
                }
            }
        }
        out
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Self::Daily),
            "1wk" => Ok(Self::Weekly),
            "1mo" => Ok(Self::Monthly),
            _ => Err(Error::InvalidParameter {
                name: "interval".to_string(),
                reason: format!("unsupported interval '{s}'"),
            }),
        }
    }
}
