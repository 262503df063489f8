//! Core data types for the market-sentiment system.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel marking an undefined indicator value (warm-up or indeterminate).
pub const UNDEFINED: f64 = f64::NAN;

/// Ordered indicator output, index-aligned 1:1 with the price series.
pub type IndicatorSeries = Vec<f64>;

/// Check whether an indicator value is defined.
#[inline]
pub fn is_defined(value: f64) -> bool {
    !value.is_nan()
}

/// A single OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar date (calendar day or intraday timestamp).
    pub date: DateTime<Utc>,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume (may be zero).
    pub volume: f64,
}

/// Column view of a price series, as consumed by the indicator functions.
#[derive(Debug, Clone, Default)]
pub struct PriceColumns {
    pub close: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub volume: Vec<f64>,
}

impl PriceColumns {
    /// Split bars into per-field columns.
    pub fn from_bars(bars: &[PriceBar]) -> Self {
        let mut columns = Self {
            close: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            volume: Vec::with_capacity(bars.len()),
        };
        for bar in bars {
            columns.close.push(bar.close);
            columns.high.push(bar.high);
            columns.low.push(bar.low);
            columns.volume.push(bar.volume);
        }
        columns
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Whether there are no bars.
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

/// Ranking direction used by the percentile normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Direction {
    /// Higher raw value maps to a higher score.
    HigherIsBetter = 1,
    /// Lower raw value maps to a higher score.
    LowerIsBetter = -1,
}

impl Direction {
    /// Get the sign as f64.
    #[inline]
    pub fn sign(self) -> f64 {
        self as i8 as f64
    }
}

/// Identifier of one of the sub-indicators that make up the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubIndicator {
    /// Close relative to the fast and slow moving averages.
    Trend,
    /// Return over the momentum window.
    Momentum,
    /// Relative strength index.
    Rsi,
    /// MACD histogram.
    Macd,
    /// Distance from the trailing high.
    Drawdown,
    /// Annualized realized volatility.
    Volatility,
    /// Money flow index.
    Mfi,
    /// Bollinger %B.
    #[serde(rename = "bb_pct_b")]
    BbPctB,
}

impl SubIndicator {
    /// All sub-indicators in reporting order.
    pub const ALL: [SubIndicator; 8] = [
        SubIndicator::Trend,
        SubIndicator::Momentum,
        SubIndicator::Rsi,
        SubIndicator::Macd,
        SubIndicator::Drawdown,
        SubIndicator::Volatility,
        SubIndicator::Mfi,
        SubIndicator::BbPctB,
    ];

    /// Stable string identifier.
    pub fn id(self) -> &'static str {
        match self {
            SubIndicator::Trend => "trend",
            SubIndicator::Momentum => "momentum",
            SubIndicator::Rsi => "rsi",
            SubIndicator::Macd => "macd",
            SubIndicator::Drawdown => "drawdown",
            SubIndicator::Volatility => "volatility",
            SubIndicator::Mfi => "mfi",
            SubIndicator::BbPctB => "bb_pct_b",
        }
    }

    /// Normalization direction. Calm markets read as greedy, so volatility is inverted.
    pub fn direction(self) -> Direction {
        match self {
            SubIndicator::Volatility => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }
}

impl fmt::Display for SubIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SubIndicator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SubIndicator::ALL
            .into_iter()
            .find(|indicator| indicator.id() == s)
            .ok_or_else(|| Error::config(format!("unknown sub-indicator: {s}")))
    }
}

/// One value per sub-indicator. Undefined entries hold NaN.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorValues {
    pub trend: f64,
    pub momentum: f64,
    pub rsi: f64,
    pub macd: f64,
    pub drawdown: f64,
    pub volatility: f64,
    pub mfi: f64,
    pub bb_pct_b: f64,
}

impl Default for IndicatorValues {
    fn default() -> Self {
        Self::undefined()
    }
}

impl IndicatorValues {
    /// All entries undefined.
    pub fn undefined() -> Self {
        Self {
            trend: UNDEFINED,
            momentum: UNDEFINED,
            rsi: UNDEFINED,
            macd: UNDEFINED,
            drawdown: UNDEFINED,
            volatility: UNDEFINED,
            mfi: UNDEFINED,
            bb_pct_b: UNDEFINED,
        }
    }

    /// Value for a sub-indicator.
    pub fn get(&self, indicator: SubIndicator) -> f64 {
        match indicator {
            SubIndicator::Trend => self.trend,
            SubIndicator::Momentum => self.momentum,
            SubIndicator::Rsi => self.rsi,
            SubIndicator::Macd => self.macd,
            SubIndicator::Drawdown => self.drawdown,
            SubIndicator::Volatility => self.volatility,
            SubIndicator::Mfi => self.mfi,
            SubIndicator::BbPctB => self.bb_pct_b,
        }
    }

    /// Set the value for a sub-indicator.
    pub fn set(&mut self, indicator: SubIndicator, value: f64) {
        let slot = match indicator {
            SubIndicator::Trend => &mut self.trend,
            SubIndicator::Momentum => &mut self.momentum,
            SubIndicator::Rsi => &mut self.rsi,
            SubIndicator::Macd => &mut self.macd,
            SubIndicator::Drawdown => &mut self.drawdown,
            SubIndicator::Volatility => &mut self.volatility,
            SubIndicator::Mfi => &mut self.mfi,
            SubIndicator::BbPctB => &mut self.bb_pct_b,
        };
        *slot = value;
    }

    /// Iterate `(indicator, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (SubIndicator, f64)> + '_ {
        SubIndicator::ALL.into_iter().map(move |indicator| (indicator, self.get(indicator)))
    }

    /// Number of defined entries.
    pub fn defined_count(&self) -> usize {
        self.iter().filter(|(_, v)| is_defined(*v)).count()
    }
}

/// Output language of the sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    /// Language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "zh" => Ok(Language::Chinese),
            other => Err(Error::config(format!("unsupported language: {other}"))),
        }
    }
}

/// Sentiment score for a single bar.
///
/// Undefined values stay NaN here; mapping them to a nullable type happens
/// at the serialization boundary, so this type is intentionally not `Serialize`.
#[derive(Debug, Clone)]
pub struct ScoreRecord {
    /// Bar date.
    pub date: DateTime<Utc>,
    /// Close price of the bar.
    pub price: f64,
    /// Raw indicator values.
    pub raw: IndicatorValues,
    /// Percentile sub-scores in [0, 100].
    pub sub_scores: IndicatorValues,
    /// Weighted aggregate in [0, 100], NaN when no sub-score is defined.
    pub score: f64,
    /// Sentiment label, or the "no data" marker.
    pub label: &'static str,
}

impl ScoreRecord {
    /// Whether the aggregate score is defined.
    pub fn has_score(&self) -> bool {
        is_defined(self.score)
    }
}
