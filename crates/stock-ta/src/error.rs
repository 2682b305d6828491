//! Error types for stock-ta.
//!
//! This module defines the error types used throughout the stock-ta library
//! for handling malformed input, missing data and invalid parameters.
//!
//! Numeric edge cases inside an indicator (zero average loss, a flat
//! stochastic window) are *not* errors: they surface as undefined values in
//! the output [`Series`](crate::series::Series).

use thiserror::Error;

/// Identifies one numeric field of a [`Bar`](crate::data::Bar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarField {
    /// Opening price.
    Open,
    /// Session high.
    High,
    /// Session low.
    Low,
    /// Closing price.
    Close,
    /// Split/dividend adjusted close.
    AdjustedClose,
    /// Traded volume.
    Volume,
}

impl BarField {
    /// Returns the field name as it appears in serialized bars.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::AdjustedClose => "adjusted_close",
            Self::Volume => "volume",
        }
    }
}

impl std::fmt::Display for BarField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a raw bar sequence is rejected by the normalizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No bars were supplied.
    #[error("empty input: no bars provided")]
    EmptySeries,

    /// A field holds NaN or an infinity.
    #[error("bar {index}: {field} is not a finite number")]
    NonFinite {
        /// Position of the bar in the raw input.
        index: usize,
        /// The offending field.
        field: BarField,
    },

    /// An open/high/low/close price is zero or negative.
    #[error("bar {index}: {field} must be positive, got {value}")]
    NonPositivePrice {
        /// Position of the bar in the raw input.
        index: usize,
        /// The offending field.
        field: BarField,
        /// The rejected value.
        value: f64,
    },

    /// Volume or adjusted close is negative.
    #[error("bar {index}: {field} must be non-negative, got {value}")]
    Negative {
        /// Position of the bar in the raw input.
        index: usize,
        /// The offending field.
        field: BarField,
        /// The rejected value.
        value: f64,
    },

    /// The bar violates `low <= min(open, close) <= max(open, close) <= high`.
    #[error("bar {index}: inconsistent range (open {open}, high {high}, low {low}, close {close})")]
    InconsistentRange {
        /// Position of the bar in the raw input.
        index: usize,
        /// Opening price.
        open: f64,
        /// Session high.
        high: f64,
        /// Session low.
        low: f64,
        /// Closing price.
        close: f64,
    },
}

/// The main error type for stock-ta operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input bar sequence is malformed or empty.
    ///
    /// Validation failures abort the whole computation; no partial results
    /// are produced for malformed input.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The price history provider has no data for the symbol.
    #[error("no price history found for symbol '{symbol}'")]
    NotFound {
        /// The requested symbol.
        symbol: String,
    },

    /// The price history provider failed for a reason other than missing data.
    #[error("failed to fetch price history for '{symbol}': {message}")]
    Provider {
        /// The requested symbol.
        symbol: String,
        /// Description of the underlying failure.
        message: String,
    },

    /// The period parameter is invalid.
    ///
    /// This error is returned when a window or span is zero.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// A non-period parameter is invalid.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// An engine configuration file could not be read or parsed.
    #[error("invalid configuration '{path}': {message}")]
    Config {
        /// Path of the configuration file.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// Failed to convert a numeric value to the target type.
    ///
    /// This error occurs when using `NumCast::from()` to convert a `usize`
    /// window length into a generic float type and the conversion fails.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

impl Error {
    /// Returns true if this error means the provider had no data at all.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this error was raised by input validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convenience type alias for Results using the stock-ta Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_error() {
        let err = Error::from(ValidationError::EmptySeries);
        assert_eq!(
            err.to_string(),
            "validation failed: empty input: no bars provided"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_non_positive_price_error() {
        let err = ValidationError::NonPositivePrice {
            index: 3,
            field: BarField::Close,
            value: -1.5,
        };
        assert_eq!(err.to_string(), "bar 3: close must be positive, got -1.5");
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound {
            symbol: "AAPL".to_string(),
        };
        assert_eq!(err.to_string(), "no price history found for symbol 'AAPL'");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_provider_error_is_distinct_from_not_found() {
        let err = Error::Provider {
            symbol: "MSFT".to_string(),
            message: "connection reset".to_string(),
        };
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "failed to fetch price history for 'MSFT': connection reset"
        );
    }

    #[test]
    fn test_invalid_period_error() {
        let err = Error::InvalidPeriod {
            period: 0,
            reason: "period must be at least 1",
        };
        assert_eq!(err.to_string(), "invalid period 0: period must be at least 1");
    }

    #[test]
    fn test_error_clone_and_equality() {
        let err = Error::InvalidParameter {
            name: "dev_up".to_string(),
            reason: "must be finite".to_string(),
        };
        assert_eq!(err.clone(), err);
        assert_ne!(
            err,
            Error::InvalidParameter {
                name: "dev_down".to_string(),
                reason: "must be finite".to_string(),
            }
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_std_error<E: std::error::Error>(_: E) {}
        accepts_std_error(Error::NumericConversion { context: "test" });
    }
}
