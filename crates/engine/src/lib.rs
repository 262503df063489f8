//! Sentiment scoring for the market-sentiment system.
//!
//! This crate provides:
//! - The aggregation engine (raw indicators -> percentile sub-scores -> weighted score)
//! - The sentiment label classifier
//! - The serialization boundary for reports

pub mod engine;
pub mod label;
pub mod report;

pub use engine::{compute, weighted_aggregate, SentimentEngine};
pub use label::{label_text, SentimentLabel, NO_DATA};
pub use report::{present, ScorePoint, SentimentReport, SeriesWindow};
