//! Price series preparation for the market-sentiment system.
//!
//! This crate handles:
//! - Ordering and de-duplicating bars by date
//! - Bar validation (finite, non-negative prices and volume)
//! - Warm-up history buffers per bar frequency

pub mod frequency;
pub mod series_builder;

pub use frequency::Frequency;
pub use series_builder::SeriesBuilder;
