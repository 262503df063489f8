//! All raw indicator series for one price series.

use crate::moving_average::sma;
use crate::oscillators::{macd_histogram, mfi, rsi};
use crate::trend::{drawdown, momentum, trend_strength};
use crate::volatility::{bollinger_percent_b, realized_volatility};
use sentiment_core::{IndicatorConfig, IndicatorSeries, IndicatorValues, PriceColumns, SubIndicator};

/// Raw (un-normalized) series of every sub-indicator, index-aligned with the bars.
#[derive(Debug, Clone, Default)]
pub struct RawIndicators {
    pub trend: IndicatorSeries,
    pub momentum: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub macd: IndicatorSeries,
    pub drawdown: IndicatorSeries,
    pub volatility: IndicatorSeries,
    pub mfi: IndicatorSeries,
    pub bb_pct_b: IndicatorSeries,
}

impl RawIndicators {
    /// Compute every raw indicator from price columns.
    pub fn compute(columns: &PriceColumns, config: &IndicatorConfig) -> Self {
        let close = &columns.close;
        let fast_ma = sma(close, config.trend_fast_window);
        let slow_ma = sma(close, config.trend_slow_window);

        Self {
            trend: trend_strength(close, &fast_ma, &slow_ma),
            momentum: momentum(close, config.momentum_window),
            rsi: rsi(close, config.rsi_window),
            macd: macd_histogram(close, config.macd_fast, config.macd_slow, config.macd_signal),
            drawdown: drawdown(close, config.drawdown_window),
            volatility: realized_volatility(close, config.volatility_window),
            mfi: mfi(&columns.high, &columns.low, close, &columns.volume, config.mfi_window),
            bb_pct_b: bollinger_percent_b(close, config.bollinger_window, config.bollinger_k),
        }
    }

    /// Series of one sub-indicator.
    pub fn series(&self, indicator: SubIndicator) -> &[f64] {
        match indicator {
            SubIndicator::Trend => &self.trend,
            SubIndicator::Momentum => &self.momentum,
            SubIndicator::Rsi => &self.rsi,
            SubIndicator::Macd => &self.macd,
            SubIndicator::Drawdown => &self.drawdown,
            SubIndicator::Volatility => &self.volatility,
            SubIndicator::Mfi => &self.mfi,
            SubIndicator::BbPctB => &self.bb_pct_b,
        }
    }

    /// Number of bars covered.
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    /// Whether no bars are covered.
    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// Raw values of every sub-indicator at bar `i`.
    pub fn values_at(&self, i: usize) -> IndicatorValues {
        let mut values = IndicatorValues::undefined();
        for indicator in SubIndicator::ALL {
            values.set(indicator, self.series(indicator)[i]);
        }
        values
    }
}
