//! Price-path indicators: momentum, drawdown and trend strength.

use crate::warmup::WarmUp;
use sentiment_core::{is_defined, IndicatorSeries, UNDEFINED};
use std::collections::VecDeque;

/// Return over `window` bars: `close[i] / close[i - window] - 1`.
///
/// Undefined during warm-up and wherever the earlier close is 0.
pub fn momentum(close: &[f64], window: usize) -> IndicatorSeries {
    let mut out = vec![UNDEFINED; close.len()];
    if window == 0 {
        return out;
    }

    for i in WarmUp::window_of_changes(window).first_index()..close.len() {
        let base = close[i - window];
        if base != 0.0 {
            out[i] = close[i] / base - 1.0;
        }
    }
    out
}

/// Distance of the close below its trailing high: `close / max - 1`.
///
/// The trailing high covers at most `window` bars and never looks ahead, so
/// the value is defined from the first bar and never positive. A non-positive
/// high yields 0.
pub fn drawdown(close: &[f64], window: usize) -> IndicatorSeries {
    let window = window.max(1);
    let mut out = Vec::with_capacity(close.len());
    // indices of a decreasing run of closes; the front is the trailing max
    let mut candidates: VecDeque<usize> = VecDeque::with_capacity(window);

    for (i, &price) in close.iter().enumerate() {
        while candidates.back().is_some_and(|&j| close[j] <= price) {
            candidates.pop_back();
        }
        candidates.push_back(i);
        while candidates.front().is_some_and(|&j| j + window <= i) {
            candidates.pop_front();
        }

        let high = candidates.front().map_or(price, |&j| close[j]);
        out.push(if high > 0.0 { price / high - 1.0 } else { 0.0 });
    }
    out
}

/// Trend strength: `0.5·(close/fast - 1) + 0.5·(close/slow - 1)`.
///
/// A term whose moving average is not positive contributes 0. Undefined
/// wherever either moving average is undefined.
pub fn trend_strength(close: &[f64], fast_ma: &[f64], slow_ma: &[f64]) -> IndicatorSeries {
    fn term(price: f64, ma: f64) -> f64 {
        if ma > 0.0 {
            price / ma - 1.0
        } else {
            0.0
        }
    }

    close
        .iter()
        .zip(fast_ma.iter().zip(slow_ma))
        .map(|(&price, (&fast, &slow))| {
            if is_defined(fast) && is_defined(slow) {
                0.5 * term(price, fast) + 0.5 * term(price, slow)
            } else {
                UNDEFINED
            }
        })
        .collect()
}
