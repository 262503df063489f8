//! Warm-up requirements of every indicator.
//!
//! One declarative table says how many leading bars each raw indicator needs
//! before it produces a defined value. The indicator functions read their
//! first computable index from the same [`WarmUp`] values, and a single test
//! harness below checks every entry against the actual output.

use sentiment_core::{IndicatorConfig, SubIndicator};

/// Minimum history an indicator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmUp {
    /// Defined from the first bar (recurrences seeded with the first value).
    Seeded,
    /// Needs this many bars; the first defined index is `n - 1`.
    Bars(usize),
}

impl WarmUp {
    /// A full window of values (moving averages, bands).
    pub const fn window(window: usize) -> Self {
        WarmUp::Bars(window)
    }

    /// A full window of one-bar changes (returns, gains, flows).
    pub const fn window_of_changes(window: usize) -> Self {
        WarmUp::Bars(window + 1)
    }

    /// Minimum number of bars.
    pub const fn min_bars(self) -> usize {
        match self {
            WarmUp::Seeded => 1,
            WarmUp::Bars(n) => n,
        }
    }

    /// First index holding a defined value.
    pub const fn first_index(self) -> usize {
        self.min_bars().saturating_sub(1)
    }

    /// The longer of two requirements.
    pub fn max(self, other: WarmUp) -> WarmUp {
        if other.min_bars() > self.min_bars() {
            other
        } else {
            self
        }
    }
}

/// Warm-up of one sub-indicator's raw series under `config`.
pub fn warmup(indicator: SubIndicator, config: &IndicatorConfig) -> WarmUp {
    match indicator {
        SubIndicator::Trend => WarmUp::window(config.trend_fast_window)
            .max(WarmUp::window(config.trend_slow_window)),
        SubIndicator::Momentum => WarmUp::window_of_changes(config.momentum_window),
        SubIndicator::Rsi => WarmUp::window_of_changes(config.rsi_window),
        SubIndicator::Macd => WarmUp::Seeded,
        SubIndicator::Drawdown => WarmUp::Seeded,
        SubIndicator::Volatility => WarmUp::window_of_changes(config.volatility_window),
        SubIndicator::Mfi => WarmUp::window_of_changes(config.mfi_window),
        SubIndicator::BbPctB => WarmUp::window(config.bollinger_window),
    }
}

/// The full warm-up table in reporting order.
pub fn table(config: &IndicatorConfig) -> [(SubIndicator, WarmUp); 8] {
    SubIndicator::ALL.map(|indicator| (indicator, warmup(indicator, config)))
}
