//! Configuration structures for the market-sentiment system.

use crate::error::{Error, Result};
use crate::types::SubIndicator;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Lower bound of the effective normalization window.
pub const MIN_NORMALIZATION_WINDOW: usize = 10;

/// Main configuration for a sentiment computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Indicator window parameters.
    pub indicators: IndicatorConfig,
    /// Trailing window for percentile normalization.
    pub normalization_window: usize,
    /// Sub-indicator weights.
    pub weights: WeightTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            normalization_window: 252,
            weights: WeightTable::default(),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a (possibly partial) JSON configuration file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Copy with a different normalization window.
    pub fn with_normalization_window(mut self, window: usize) -> Self {
        self.normalization_window = window;
        self
    }

    /// Normalization window actually used for a series of `len` bars.
    ///
    /// Clamped to the series length, then floored at [`MIN_NORMALIZATION_WINDOW`].
    /// The floor wins for very short series, which leaves every sub-score undefined.
    pub fn effective_normalization_window(&self, len: usize) -> usize {
        self.normalization_window.min(len).max(MIN_NORMALIZATION_WINDOW)
    }

    /// Check every field for values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.normalization_window == 0 {
            return Err(Error::config("normalization_window must be positive"));
        }
        self.indicators.validate()?;
        self.weights.validate()
    }
}

/// Window parameters for the raw indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Fast moving average for trend strength.
    pub trend_fast_window: usize,
    /// Slow moving average for trend strength.
    pub trend_slow_window: usize,
    /// Momentum lookback.
    pub momentum_window: usize,
    /// Realized volatility window.
    pub volatility_window: usize,
    /// RSI window.
    pub rsi_window: usize,
    /// Money flow index window.
    pub mfi_window: usize,
    /// Trailing high window for drawdown.
    pub drawdown_window: usize,
    /// Bollinger band window.
    pub bollinger_window: usize,
    /// Bollinger band width in standard deviations.
    pub bollinger_k: f64,
    /// MACD fast EMA span.
    pub macd_fast: usize,
    /// MACD slow EMA span.
    pub macd_slow: usize,
    /// MACD signal EMA span.
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            trend_fast_window: 20,
            trend_slow_window: 60,
            momentum_window: 20,
            volatility_window: 20,
            rsi_window: 14,
            mfi_window: 14,
            drawdown_window: 252,
            bollinger_window: 20,
            bollinger_k: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl IndicatorConfig {
    /// Reject zero windows and inconsistent MACD spans.
    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("trend_fast_window", self.trend_fast_window),
            ("trend_slow_window", self.trend_slow_window),
            ("momentum_window", self.momentum_window),
            ("volatility_window", self.volatility_window),
            ("rsi_window", self.rsi_window),
            ("mfi_window", self.mfi_window),
            ("drawdown_window", self.drawdown_window),
            ("bollinger_window", self.bollinger_window),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(Error::config(format!("{name} must be positive")));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(Error::config(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if !self.bollinger_k.is_finite() || self.bollinger_k <= 0.0 {
            return Err(Error::config("bollinger_k must be a positive number"));
        }
        Ok(())
    }
}

/// Immutable sub-indicator weight table.
///
/// Weights need not sum to 1; the aggregate divides by the weights of the
/// sub-scores defined at each bar. A missing entry weighs 0.
///
/// Deserialized tables are overrides: listed entries replace the default
/// weights, unlisted ones keep them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<SubIndicator, f64>,
}

impl<'de> Deserialize<'de> for WeightTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let overrides = BTreeMap::<SubIndicator, f64>::deserialize(deserializer)?;
        let mut table = WeightTable::default();
        table.weights.extend(overrides);
        Ok(table)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::from_pairs([
            (SubIndicator::Trend, 0.15),
            (SubIndicator::Momentum, 0.15),
            (SubIndicator::Rsi, 0.10),
            (SubIndicator::Macd, 0.10),
            (SubIndicator::Drawdown, 0.10),
            (SubIndicator::Volatility, 0.10),
            (SubIndicator::Mfi, 0.15),
            (SubIndicator::BbPctB, 0.15),
        ])
    }
}

impl WeightTable {
    /// Build a table from `(indicator, weight)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (SubIndicator, f64)>) -> Self {
        Self {
            weights: pairs.into_iter().collect(),
        }
    }

    /// The same weight for every sub-indicator.
    pub fn uniform(weight: f64) -> Self {
        Self::from_pairs(SubIndicator::ALL.into_iter().map(|indicator| (indicator, weight)))
    }

    /// Weight of a sub-indicator (0 if absent).
    pub fn weight(&self, indicator: SubIndicator) -> f64 {
        self.weights.get(&indicator).copied().unwrap_or(0.0)
    }

    /// Copy of this table with one weight replaced.
    pub fn with_weight(&self, indicator: SubIndicator, weight: f64) -> Self {
        let mut weights = self.weights.clone();
        weights.insert(indicator, weight);
        Self { weights }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Iterate `(indicator, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SubIndicator, f64)> + '_ {
        self.weights.iter().map(|(&indicator, &weight)| (indicator, weight))
    }

    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> Result<()> {
        for (indicator, weight) in self.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::config(format!(
                    "weight for {indicator} must be a non-negative number, got {weight}"
                )));
            }
        }
        Ok(())
    }
}
