//! Indicator computation for the market-sentiment system.
//!
//! This crate handles:
//! - Moving averages (simple, exponential)
//! - Oscillators (RSI, MACD histogram, money flow index)
//! - Dispersion (Bollinger %B, realized volatility)
//! - Price path (momentum, drawdown, trend strength)
//! - Rolling percentile normalization
//! - The warm-up table shared by all of the above
//!
//! Every function is pure: equal-length slices in, a new series of the same
//! length out, with NaN marking undefined positions.

pub mod moving_average;
pub mod normalizer;
pub mod oscillators;
pub mod raw;
pub mod trend;
pub mod volatility;
pub mod warmup;

pub use moving_average::{ema, sma};
pub use normalizer::rolling_percentile;
pub use oscillators::{macd_histogram, mfi, rsi};
pub use raw::RawIndicators;
pub use trend::{drawdown, momentum, trend_strength};
pub use volatility::{bollinger_percent_b, realized_volatility};
pub use warmup::WarmUp;
