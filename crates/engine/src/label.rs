//! Sentiment label classifier.

use sentiment_core::{is_defined, Language};
use serde::Serialize;

/// Label of a bar whose aggregate score is undefined, in every language.
pub const NO_DATA: &str = "-";

/// One of five ordinal sentiment buckets.
///
/// Serializes as a language-independent snake_case id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    /// score < 25
    ExtremeFear,
    /// 25 <= score < 45
    Fear,
    /// 45 <= score <= 55
    Neutral,
    /// 55 < score <= 75
    Greed,
    /// score > 75
    ExtremeGreed,
}

impl SentimentLabel {
    /// All buckets from most fearful to most greedy.
    pub const ALL: [SentimentLabel; 5] = [
        SentimentLabel::ExtremeFear,
        SentimentLabel::Fear,
        SentimentLabel::Neutral,
        SentimentLabel::Greed,
        SentimentLabel::ExtremeGreed,
    ];

    /// Bucket of a score; `None` when the score is undefined.
    pub fn classify(score: f64) -> Option<Self> {
        if !is_defined(score) {
            return None;
        }
        let label = if score < 25.0 {
            SentimentLabel::ExtremeFear
        } else if score < 45.0 {
            SentimentLabel::Fear
        } else if score <= 55.0 {
            SentimentLabel::Neutral
        } else if score <= 75.0 {
            SentimentLabel::Greed
        } else {
            SentimentLabel::ExtremeGreed
        };
        Some(label)
    }

    /// Display text in the given language.
    pub fn text(self, language: Language) -> &'static str {
        match language {
            Language::English => match self {
                SentimentLabel::ExtremeFear => "Extreme Fear",
                SentimentLabel::Fear => "Fear",
                SentimentLabel::Neutral => "Neutral",
                SentimentLabel::Greed => "Greed",
                SentimentLabel::ExtremeGreed => "Extreme Greed",
            },
            Language::Chinese => match self {
                SentimentLabel::ExtremeFear => "极度恐惧",
                SentimentLabel::Fear => "恐惧",
                SentimentLabel::Neutral => "中性",
                SentimentLabel::Greed => "贪婪",
                SentimentLabel::ExtremeGreed => "极度贪婪",
            },
        }
    }
}

/// Label text of a score, or [`NO_DATA`] when it is undefined.
pub fn label_text(score: f64, language: Language) -> &'static str {
    SentimentLabel::classify(score).map_or(NO_DATA, |label| label.text(language))
}
