//! Technical analysis indicators.
//!
//! Each indicator takes a slice of [`Bar`](crate::data::Bar)s and returns
//! [`Series`](crate::series::Series) values aligned one-to-one with the
//! input: every output series has exactly as many positions as there are
//! bars, with undefined positions where the indicator has no value.
//!
//! | Indicator | Function | Output keys |
//! |-----------|----------|-------------|
//! | `MA` | [`moving_average`] | `MA5`, `MA10`, `MA20`, `MA60` |
//! | `RSI` | [`rsi`] | `RSI` |
//! | `MACD` | [`macd`] | `MACD`, `MACD_signal`, `MACD_hist` |
//! | `BBANDS` | [`bollinger_bands`] | `BBANDS_upper`, `BBANDS_middle`, `BBANDS_lower` |
//! | `STOCH` | [`stochastic`] | `STOCH_K`, `STOCH_D` |
//!
//! The functions here do not validate the bars; the
//! [`Engine`](crate::engine::Engine) normalizes input before calling them.

pub mod bollinger;
pub mod ma;
pub mod macd;
pub mod rsi;
pub mod stochastic;

pub use bollinger::{bollinger_bands, BollingerOutput};
pub use ma::{moving_average, sma, MovingAverages};
pub use macd::{macd, MacdOutput};
pub use rsi::rsi;
pub use stochastic::{stochastic, StochasticOutput};
