//! Price series preparation.
//!
//! Collects bars from a data source in any order and emits a series that is
//! strictly ascending by date with no duplicates, which is what the scoring
//! engine assumes.

use chrono::{DateTime, Utc};
use sentiment_core::{Error, PriceBar, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Builder for a validated, date-ordered price series.
#[derive(Debug, Default)]
pub struct SeriesBuilder {
    /// Bars keyed by date.
    bars: BTreeMap<DateTime<Utc>, PriceBar>,
    /// Bars that replaced an earlier bar with the same date.
    duplicates_replaced: usize,
}

impl SeriesBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from an iterator of bars, failing on the first invalid bar.
    pub fn from_bars(bars: impl IntoIterator<Item = PriceBar>) -> Result<Vec<PriceBar>> {
        let mut builder = Self::new();
        builder.extend(bars)?;
        Ok(builder.build())
    }

    /// Add a bar. A later bar with an already-seen date replaces the earlier one.
    pub fn push(&mut self, bar: PriceBar) -> Result<()> {
        validate_bar(&bar)?;
        let date = bar.date;
        if self.bars.insert(date, bar).is_some() {
            self.duplicates_replaced += 1;
            debug!(%date, "replaced duplicate bar");
        }
        Ok(())
    }

    /// Add multiple bars.
    pub fn extend(&mut self, bars: impl IntoIterator<Item = PriceBar>) -> Result<()> {
        for bar in bars {
            self.push(bar)?;
        }
        Ok(())
    }

    /// Number of distinct bars collected.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether no bars have been collected.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of bars that overwrote an earlier bar with the same date.
    pub fn duplicates_replaced(&self) -> usize {
        self.duplicates_replaced
    }

    /// Finish and return the bars in ascending date order.
    pub fn build(self) -> Vec<PriceBar> {
        self.bars.into_values().collect()
    }
}

/// Prices and volume must be finite and non-negative.
fn validate_bar(bar: &PriceBar) -> Result<()> {
    let fields = [
        ("open", bar.open),
        ("high", bar.high),
        ("low", bar.low),
        ("close", bar.close),
        ("volume", bar.volume),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::data(format!(
                "bar at {}: {name} must be a finite non-negative number, got {value}",
                bar.date
            )));
        }
    }
    Ok(())
}
