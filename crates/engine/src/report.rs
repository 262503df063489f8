//! Serialization boundary.
//!
//! Score records keep NaN for undefined values. This module is the only place
//! where they are turned into nullable values and encoded.

use crate::label::SentimentLabel;
use chrono::{DateTime, Utc};
use sentiment_core::{
    is_defined, Config, Language, Result, ScoreRecord, SubIndicator, WeightTable,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default number of trailing records in a report.
pub const DEFAULT_TAIL: usize = 600;

/// Date format used in reports.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Map the NaN sentinel to `None`.
#[inline]
pub fn present(value: f64) -> Option<f64> {
    is_defined(value).then_some(value)
}

/// One reported bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    /// Bar date, `YYYY-MM-DD`.
    pub date: String,
    /// Aggregate score, `null` when undefined.
    pub score: Option<f64>,
    /// Sentiment label.
    pub label: &'static str,
    /// Language-independent sentiment bucket, `null` when the score is undefined.
    pub sentiment: Option<SentimentLabel>,
    /// Close price.
    pub price: f64,
}

impl From<&ScoreRecord> for ScorePoint {
    fn from(record: &ScoreRecord) -> Self {
        Self {
            date: record.date.format(DATE_FORMAT).to_string(),
            score: present(record.score),
            label: record.label,
            sentiment: SentimentLabel::classify(record.score),
            price: record.price,
        }
    }
}

/// Which records of a computation to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesWindow {
    /// The last `n` records.
    Tail(usize),
    /// Records dated on or after the given instant.
    Since(DateTime<Utc>),
}

impl Default for SeriesWindow {
    fn default() -> Self {
        SeriesWindow::Tail(DEFAULT_TAIL)
    }
}

impl SeriesWindow {
    /// Index of the first reported record.
    ///
    /// A non-empty input always reports at least its last record. A `Since`
    /// date past the last record reports the whole series.
    pub fn start_index(&self, records: &[ScoreRecord]) -> usize {
        let Some(last) = records.len().checked_sub(1) else {
            return 0;
        };
        let start = match *self {
            SeriesWindow::Tail(n) => records.len().saturating_sub(n),
            SeriesWindow::Since(start) => {
                records.iter().position(|r| r.date >= start).unwrap_or(0)
            }
        };
        start.min(last)
    }
}

/// Client-facing summary of a sentiment computation.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    /// Label language.
    pub language: Language,
    /// Normalization window actually used.
    pub normalization_window: usize,
    /// Most recent record, present only when its score is defined.
    pub latest: Option<ScorePoint>,
    /// Reported records in date order.
    pub series: Vec<ScorePoint>,
    /// Sub-scores of the most recent record, present only with `latest`.
    pub latest_subscores: Option<BTreeMap<SubIndicator, Option<f64>>>,
    /// Weights used for the aggregate.
    pub weights: WeightTable,
}

impl SentimentReport {
    /// Build a report over the records selected by `window`.
    pub fn build(
        records: &[ScoreRecord],
        config: &Config,
        language: Language,
        window: SeriesWindow,
    ) -> Self {
        let start = window.start_index(records);
        let series = records[start..].iter().map(ScorePoint::from).collect();

        let last = records.last().filter(|r| r.has_score());
        let latest = last.map(ScorePoint::from);
        let latest_subscores = last.map(|r| {
            r.sub_scores
                .iter()
                .map(|(indicator, score)| (indicator, present(score)))
                .collect()
        });

        Self {
            language,
            normalization_window: config.effective_normalization_window(records.len()),
            latest,
            series,
            latest_subscores,
            weights: config.weights.clone(),
        }
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::NO_DATA;
    use chrono::{Duration, TimeZone};
    use sentiment_core::IndicatorValues;

    fn day(i: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i)
    }

    fn record(i: i64, score: f64) -> ScoreRecord {
        let mut sub_scores = IndicatorValues::undefined();
        if is_defined(score) {
            sub_scores.set(SubIndicator::Rsi, score);
        }
        ScoreRecord {
            date: day(i),
            price: 100.0 + i as f64,
            raw: IndicatorValues::undefined(),
            sub_scores,
            score,
            label: if is_defined(score) { "Neutral" } else { NO_DATA },
        }
    }

    fn records() -> Vec<ScoreRecord> {
        vec![record(0, f64::NAN), record(1, f64::NAN), record(2, 50.0), record(3, 52.0)]
    }

    #[test]
    fn test_present() {
        assert_eq!(present(1.5), Some(1.5));
        assert_eq!(present(f64::NAN), None);
    }

    #[test]
    fn test_tail() {
        let records = records();
        assert_eq!(SeriesWindow::Tail(2).start_index(&records), 2);
        assert_eq!(SeriesWindow::Tail(600).start_index(&records), 0);
        assert_eq!(SeriesWindow::Tail(0).start_index(&records), 3);
        assert_eq!(SeriesWindow::Tail(5).start_index(&[]), 0);
    }

    #[test]
    fn test_since() {
        let records = records();
        assert_eq!(SeriesWindow::Since(day(1)).start_index(&records), 1);
        assert_eq!(SeriesWindow::Since(day(-10)).start_index(&records), 0);
        assert_eq!(SeriesWindow::Since(day(3)).start_index(&records), 3);
        // after the last bar: the whole series
        assert_eq!(SeriesWindow::Since(day(30)).start_index(&records), 0);
        assert_eq!(SeriesWindow::Since(day(30)).start_index(&[]), 0);
    }

    #[test]
    fn test_build() {
        let report = SentimentReport::build(
            &records(),
            &Config::default(),
            Language::English,
            SeriesWindow::Tail(3),
        );

        assert_eq!(report.series.len(), 3);
        assert_eq!(report.series[0].date, "2024-01-02");
        assert_eq!(report.series[0].score, None);
        assert_eq!(report.latest.as_ref().unwrap().score, Some(52.0));
        assert_eq!(report.normalization_window, 10);

        let subscores = report.latest_subscores.unwrap();
        assert_eq!(subscores[&SubIndicator::Rsi], Some(52.0));
        assert_eq!(subscores[&SubIndicator::Trend], None);
    }

    #[test]
    fn test_undefined_latest_omitted() {
        let records = vec![record(0, 40.0), record(1, f64::NAN)];
        let report = SentimentReport::build(
            &records,
            &Config::default(),
            Language::English,
            SeriesWindow::default(),
        );
        assert!(report.latest.is_none());
        assert!(report.latest_subscores.is_none());
        assert_eq!(report.series.len(), 2);
    }

    #[test]
    fn test_json_has_nulls_not_nan() {
        let report = SentimentReport::build(
            &records(),
            &Config::default(),
            Language::English,
            SeriesWindow::default(),
        );
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["series"][0]["score"].is_null());
        assert_eq!(value["series"][0]["label"], "-");
        assert!(value["series"][0]["sentiment"].is_null());
        assert_eq!(value["latest"]["score"], 52.0);
        assert_eq!(value["latest"]["sentiment"], "neutral");
        assert!(value["latest_subscores"]["bb_pct_b"].is_null());
        assert_eq!(value["weights"]["mfi"], 0.15);
        assert_eq!(value["language"], "en");
        assert!(!json.contains("NaN"));
    }

    #[test]
    fn test_empty_report() {
        let report = SentimentReport::build(
            &[],
            &Config::default(),
            Language::Chinese,
            SeriesWindow::default(),
        );
        assert!(report.series.is_empty());
        assert!(report.latest.is_none());
        assert!(report.to_json_pretty().is_ok());
    }
}
