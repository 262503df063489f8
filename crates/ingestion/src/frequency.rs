//! Bar frequency and warm-up history buffer.

use chrono::{DateTime, Months, Utc};
use sentiment_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sampling frequency of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    /// One bar per trading day.
    #[default]
    #[serde(rename = "1d")]
    Daily,
    /// One bar per trading hour.
    #[serde(rename = "1h")]
    Hourly,
}

impl Frequency {
    /// Frequency code.
    pub fn code(self) -> &'static str {
        match self {
            Frequency::Daily => "1d",
            Frequency::Hourly => "1h",
        }
    }

    /// Extra history to fetch before the first reported bar so that the
    /// slowest indicators and the normalization window are warmed up.
    pub fn warmup_buffer(self) -> Months {
        match self {
            // two years covers a 252-bar normalization window twice
            Frequency::Daily => Months::new(24),
            Frequency::Hourly => Months::new(2),
        }
    }

    /// Date from which to fetch bars when the caller wants scores from `start`.
    pub fn warmup_fetch_start(self, start: DateTime<Utc>) -> DateTime<Utc> {
        start
            .checked_sub_months(self.warmup_buffer())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1d" => Ok(Frequency::Daily),
            "1h" => Ok(Frequency::Hourly),
            other => Err(Error::config(format!("unsupported frequency: {other}"))),
        }
    }
}
