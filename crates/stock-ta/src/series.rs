//! Indicator output series.
//!
//! A [`Series`] is aligned 1:1 with the bar sequence it was computed from.
//! Positions that are not computable (warm-up prefix, flat-market RSI, a
//! zero-range stochastic window) hold `None` and serialize as JSON `null`,
//! never as `0`, `NaN` or an omitted slot, so index-to-date alignment
//! survives serialization.

use std::ops::Range;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A derived numeric series with explicit undefined positions.
///
/// # Example
///
/// ```
/// use stock_ta::series::Series;
///
/// let series = Series::from_raw(vec![f64::NAN, 1.5, f64::INFINITY]);
/// assert_eq!(series.values(), &[None, Some(1.5), None]);
/// assert_eq!(serde_json::to_string(&series).unwrap(), "[null,1.5,null]");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    values: Vec<Option<f64>>,
}

impl Series {
    /// Builds a series from kernel output, mapping every non-finite value to undefined.
    #[must_use]
    pub fn from_raw(raw: Vec<f64>) -> Self {
        raw.into_iter()
            .map(|v| if v.is_finite() { Some(v) } else { None })
            .collect()
    }

    /// Builds a series of `len` undefined values.
    #[must_use]
    pub fn undefined(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    /// Returns the number of positions, defined or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `index`, or `None` when undefined or out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Returns all positions.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Iterates over all positions.
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().copied()
    }

    /// Number of defined positions.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Index of the first defined position.
    #[must_use]
    pub fn first_defined_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// The most recent defined value.
    #[must_use]
    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }

    /// Pairs each position with its date.
    ///
    /// `dates` must be the date axis of the bars this series was computed from.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `dates` and the series differ in
    /// length.
    pub fn points<'a>(
        &'a self,
        dates: &'a [NaiveDate],
    ) -> Result<impl Iterator<Item = (NaiveDate, Option<f64>)> + 'a> {
        if dates.len() != self.values.len() {
            return Err(Error::InvalidParameter {
                name: "dates".to_string(),
                reason: format!(
                    "{} dates for a series of {} values",
                    dates.len(),
                    self.values.len()
                ),
            });
        }
        Ok(dates.iter().copied().zip(self.iter()))
    }

    /// Returns the sub-series covering `range`.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            values: self.values[range].to_vec(),
        }
    }

    /// Converts back to kernel input, mapping undefined to NaN.
    pub(crate) fn to_raw(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    }
}

impl FromIterator<Option<f64>> for Series {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Option<f64>>> for Series {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }
}
