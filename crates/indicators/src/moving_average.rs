//! Simple and exponential moving averages.

use crate::warmup::WarmUp;
use sentiment_core::{IndicatorSeries, UNDEFINED};

/// Simple moving average of the trailing `window` values.
///
/// Undefined for indices below `window - 1`.
pub fn sma(values: &[f64], window: usize) -> IndicatorSeries {
    let mut out = vec![UNDEFINED; values.len()];
    let first = WarmUp::window(window).first_index();
    if window == 0 || values.len() <= first {
        return out;
    }

    let n = window as f64;
    let mut sum: f64 = values[..window].iter().sum();
    out[first] = sum / n;

    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out[i] = sum / n;
    }
    out
}

/// Exponential moving average with smoothing `k = 2 / (span + 1)`.
///
/// Seeded with the first value, so every index is defined.
pub fn ema(values: &[f64], span: usize) -> IndicatorSeries {
    let mut out = Vec::with_capacity(values.len());
    let Some(&seed) = values.first() else {
        return out;
    };

    let k = 2.0 / (span as f64 + 1.0);
    let mut prev = seed;
    out.push(seed);
    for &v in &values[1..] {
        prev = v * k + prev * (1.0 - k);
        out.push(prev);
    }
    out
}
