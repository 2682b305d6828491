//! Price data: bars, normalization, history windows and providers.

pub mod bar;
pub mod normalize;
pub mod provider;
pub mod window;

pub use bar::{close_prices, dates, high_prices, low_prices, Bar};
pub use normalize::{normalize, PriceSeries};
pub use provider::{select_window, HistoryProvider, MemoryProvider};
pub use window::{Interval, Lookback};
