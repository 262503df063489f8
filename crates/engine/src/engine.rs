//! Sentiment aggregation engine.
//!
//! Computes every raw indicator, ranks each against its trailing window and
//! combines the percentile sub-scores into one weighted score per bar.

use crate::label::label_text;
use crate::report::{SentimentReport, SeriesWindow};
use sentiment_core::{
    config::MIN_NORMALIZATION_WINDOW, is_defined, Config, IndicatorSeries, IndicatorValues,
    Language, PriceBar, PriceColumns, Result, ScoreRecord, SubIndicator, WeightTable, UNDEFINED,
};
use sentiment_indicators::{rolling_percentile, RawIndicators};
use tracing::{debug, trace, warn};

/// Weighted mean of the defined sub-scores.
///
/// Only sub-scores that are defined contribute to the numerator and to the
/// weight sum. Undefined when nothing contributes a positive weight.
pub fn weighted_aggregate(sub_scores: &IndicatorValues, weights: &WeightTable) -> f64 {
    let mut score_sum = 0.0;
    let mut weight_sum = 0.0;

    for (indicator, score) in sub_scores.iter() {
        if is_defined(score) {
            let weight = weights.weight(indicator);
            score_sum += score * weight;
            weight_sum += weight;
        }
    }

    if weight_sum > 0.0 {
        score_sum / weight_sum
    } else {
        UNDEFINED
    }
}

/// Percentile sub-score series for every sub-indicator.
fn normalize_all(raw: &RawIndicators, window: usize) -> Vec<(SubIndicator, IndicatorSeries)> {
    SubIndicator::ALL
        .into_iter()
        .map(|indicator| {
            let scores = rolling_percentile(raw.series(indicator), window, indicator.direction());
            trace!(
                %indicator,
                defined = scores.iter().filter(|v| is_defined(**v)).count(),
                "normalized sub-indicator"
            );
            (indicator, scores)
        })
        .collect()
}

/// Score every bar of `bars`.
///
/// Deterministic and total: the output has one record per bar, in input
/// order, and is empty only for empty input. Bars must already be sorted
/// ascending by date without duplicates. `config` is used as given; see
/// [`SentimentEngine::new`] for the validated entry point.
pub fn compute(bars: &[PriceBar], config: &Config, language: Language) -> Vec<ScoreRecord> {
    if bars.is_empty() {
        return Vec::new();
    }

    let window = config.effective_normalization_window(bars.len());
    debug!(bars = bars.len(), window, language = language.code(), "computing sentiment scores");
    if bars.len() < MIN_NORMALIZATION_WINDOW {
        warn!(
            bars = bars.len(),
            min = MIN_NORMALIZATION_WINDOW,
            "series shorter than the normalization floor, all scores will be undefined"
        );
    }

    let columns = PriceColumns::from_bars(bars);
    let raw = RawIndicators::compute(&columns, &config.indicators);
    let normalized = normalize_all(&raw, window);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let mut sub_scores = IndicatorValues::undefined();
            for (indicator, scores) in &normalized {
                sub_scores.set(*indicator, scores[i]);
            }
            let score = weighted_aggregate(&sub_scores, &config.weights);

            ScoreRecord {
                date: bar.date,
                price: bar.close,
                raw: raw.values_at(i),
                sub_scores,
                score,
                label: label_text(score, language),
            }
        })
        .collect()
}

/// Sentiment engine bound to a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct SentimentEngine {
    config: Config,
}

impl SentimentEngine {
    /// Create an engine, rejecting configurations it cannot use.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Score every bar of `bars`.
    pub fn compute(&self, bars: &[PriceBar], language: Language) -> Vec<ScoreRecord> {
        compute(bars, &self.config, language)
    }

    /// Score `bars` and package the selected slice for serialization.
    pub fn report(
        &self,
        bars: &[PriceBar],
        language: Language,
        window: SeriesWindow,
    ) -> SentimentReport {
        let records = self.compute(bars, language);
        SentimentReport::build(&records, &self.config, language, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::NO_DATA;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};
    use sentiment_core::Error;

    fn make_bars(n: usize) -> Vec<PriceBar> {
        let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let t = i as f64;
                let close = 100.0 + 0.2 * t + 6.0 * (t * 0.21).sin() + 2.0 * (t * 1.7).cos();
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open: close - 0.3,
                    high: close + 1.0 + (t * 0.8).sin().abs(),
                    low: close - 1.0 - (t * 0.6).cos().abs(),
                    close,
                    volume: 10_000.0 + 3_000.0 * (t * 0.37).sin(),
                }
            })
            .collect()
    }

    #[test]
    fn test_aggregate_equal_scores() {
        let mut sub_scores = IndicatorValues::undefined();
        for indicator in SubIndicator::ALL {
            sub_scores.set(indicator, 60.0);
        }
        let score = weighted_aggregate(&sub_scores, &WeightTable::default());
        assert_relative_eq!(score, 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_single_defined() {
        let mut sub_scores = IndicatorValues::undefined();
        sub_scores.set(SubIndicator::Mfi, 80.0);
        let score = weighted_aggregate(&sub_scores, &WeightTable::default());
        assert_relative_eq!(score, 80.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_weighted() {
        let mut sub_scores = IndicatorValues::undefined();
        sub_scores.set(SubIndicator::Trend, 100.0); // 0.15
        sub_scores.set(SubIndicator::Rsi, 0.0); // 0.10
        let score = weighted_aggregate(&sub_scores, &WeightTable::default());
        assert_relative_eq!(score, 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregate_none_defined() {
        let score = weighted_aggregate(&IndicatorValues::undefined(), &WeightTable::default());
        assert!(score.is_nan());
    }

    #[test]
    fn test_aggregate_zero_weights() {
        let mut sub_scores = IndicatorValues::undefined();
        sub_scores.set(SubIndicator::Macd, 40.0);
        assert!(weighted_aggregate(&sub_scores, &WeightTable::uniform(0.0)).is_nan());
    }

    #[test]
    fn test_empty_input() {
        assert!(compute(&[], &Config::default(), Language::English).is_empty());
    }

    #[test]
    fn test_alignment_and_ranges() {
        let bars = make_bars(400);
        let records = compute(&bars, &Config::default(), Language::English);

        assert_eq!(records.len(), bars.len());
        for (record, bar) in records.iter().zip(&bars) {
            assert_eq!(record.date, bar.date);
            assert_eq!(record.price, bar.close);
            for (_, score) in record.sub_scores.iter() {
                assert!(score.is_nan() || (0.0..=100.0).contains(&score));
            }
            assert_eq!(record.score.is_nan(), record.sub_scores.defined_count() == 0);
            if record.has_score() {
                assert!((0.0..=100.0).contains(&record.score));
                assert_ne!(record.label, NO_DATA);
            } else {
                assert_eq!(record.label, NO_DATA);
            }
        }
        assert!(records.last().unwrap().has_score());
    }

    #[test]
    fn test_first_score_at_window() {
        let bars = make_bars(400);
        let records = compute(&bars, &Config::default(), Language::English);

        // seeded indicators become rankable once the 252-bar window is filled
        assert!(records[..251].iter().all(|r| !r.has_score()));
        assert!(records[251..].iter().all(|r| r.has_score()));
    }

    #[test]
    fn test_short_history_shrinks_window() {
        let bars = make_bars(100);
        let records = compute(&bars, &Config::default(), Language::English);

        // window clamps to 100, so only the last bar is rankable
        assert!(records[..99].iter().all(|r| !r.has_score()));
        assert!(records[99].has_score());
    }

    #[test]
    fn test_below_floor_is_undefined() {
        let bars = make_bars(7);
        let records = compute(&bars, &Config::default(), Language::English);

        assert_eq!(records.len(), 7);
        assert!(records.iter().all(|r| !r.has_score() && r.label == NO_DATA));
        // raw values are still reported
        assert!(records.iter().all(|r| !r.raw.drawdown.is_nan()));
    }

    #[test]
    fn test_deterministic() {
        let bars = make_bars(300);
        let config = Config::default().with_normalization_window(60);
        let a = compute(&bars, &config, Language::Chinese);
        let b = compute(&bars, &config, Language::Chinese);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.score.to_bits(), y.score.to_bits());
            assert_eq!(x.label, y.label);
            for ((_, u), (_, v)) in x.sub_scores.iter().zip(y.sub_scores.iter()) {
                assert_eq!(u.to_bits(), v.to_bits());
            }
            for ((_, u), (_, v)) in x.raw.iter().zip(y.raw.iter()) {
                assert_eq!(u.to_bits(), v.to_bits());
            }
        }
    }

    #[test]
    fn test_weights_change_score_not_availability() {
        let bars = make_bars(200);
        let base = Config::default().with_normalization_window(50);
        let mut trend_only = base.clone();
        trend_only.weights = WeightTable::from_pairs([(SubIndicator::Trend, 1.0)]);

        let a = compute(&bars, &base, Language::English);
        let b = compute(&bars, &trend_only, Language::English);

        let last = bars.len() - 1;
        assert_relative_eq!(b[last].score, b[last].sub_scores.trend, epsilon = 1e-12);
        assert_eq!(a[last].sub_scores.trend.to_bits(), b[last].sub_scores.trend.to_bits());
    }

    #[test]
    fn test_partial_weight_override_keeps_scores() {
        let json = r#"{"normalization_window": 10, "weights": {"trend": 1.0}}"#;
        let config = Config::from_json_str(json).unwrap();
        let records = compute(&make_bars(30), &config, Language::English);

        assert!(records.iter().any(|r| r.sub_scores.defined_count() > 0));
        for record in &records {
            assert_eq!(record.score.is_nan(), record.sub_scores.defined_count() == 0);
        }
        let last = records.last().unwrap();
        assert!(last.has_score());
        assert_ne!(last.label, NO_DATA);
    }

    #[test]
    fn test_engine_validates() {
        let mut config = Config::default();
        config.indicators.rsi_window = 0;
        assert!(matches!(SentimentEngine::new(config), Err(Error::Config(_))));

        let engine = SentimentEngine::new(Config::default()).unwrap();
        assert_eq!(engine.config().normalization_window, 252);
        assert_eq!(engine.compute(&make_bars(20), Language::English).len(), 20);
    }
}
