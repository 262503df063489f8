//! Bounded oscillators: RSI, MACD histogram and money flow index.

use crate::moving_average::ema;
use crate::warmup::WarmUp;
use sentiment_core::{IndicatorSeries, UNDEFINED};

/// `100 - 100 / (1 + up/down)` with the zero-denominator cases resolved
/// explicitly: no downside with some upside is 100, no movement at all is 0.
#[inline]
fn ratio_index(up: f64, down: f64) -> f64 {
    if down == 0.0 {
        if up > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        100.0 - 100.0 / (1.0 + up / down)
    }
}

/// Relative strength index with Wilder's smoothing.
///
/// The first value, at index `window`, uses the plain average of the first
/// `window` gains and losses; later values smooth with factor `1 / window`.
pub fn rsi(values: &[f64], window: usize) -> IndicatorSeries {
    let mut out = vec![UNDEFINED; values.len()];
    let first = WarmUp::window_of_changes(window).first_index();
    if window == 0 || values.len() <= first {
        return out;
    }

    let mut gains = vec![0.0; values.len()];
    let mut losses = vec![0.0; values.len()];
    for i in 1..values.len() {
        let diff = values[i] - values[i - 1];
        if diff > 0.0 {
            gains[i] = diff;
        } else {
            losses[i] = -diff;
        }
    }

    let n = window as f64;
    let mut avg_gain = gains[1..=window].iter().sum::<f64>() / n;
    let mut avg_loss = losses[1..=window].iter().sum::<f64>() / n;
    out[first] = ratio_index(avg_gain, avg_loss);

    for i in first + 1..values.len() {
        avg_gain = (avg_gain * (n - 1.0) + gains[i]) / n;
        avg_loss = (avg_loss * (n - 1.0) + losses[i]) / n;
        out[i] = ratio_index(avg_gain, avg_loss);
    }
    out
}

/// MACD histogram: `(EMA_fast - EMA_slow) - EMA_signal(EMA_fast - EMA_slow)`.
///
/// All EMAs are seeded, so the histogram is defined from index 0.
pub fn macd_histogram(values: &[f64], fast: usize, slow: usize, signal: usize) -> IndicatorSeries {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);
    let macd_line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd_line, signal);

    macd_line.iter().zip(&signal_line).map(|(m, s)| m - s).collect()
}

/// Money flow index.
///
/// Each bar's raw money flow (typical price × volume) counts as positive when
/// the typical price rose from the prior bar, negative when it fell, and is
/// discarded when unchanged. Flows are summed over the trailing `window` bars.
pub fn mfi(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    window: usize,
) -> IndicatorSeries {
    let n = close.len();
    let mut out = vec![UNDEFINED; n];
    let first = WarmUp::window_of_changes(window).first_index();
    if window == 0 || n <= first {
        return out;
    }

    let typical: Vec<f64> = (0..n).map(|i| (high[i] + low[i] + close[i]) / 3.0).collect();

    let mut positive = vec![0.0; n];
    let mut negative = vec![0.0; n];
    for i in 1..n {
        let flow = typical[i] * volume[i];
        if typical[i] > typical[i - 1] {
            positive[i] = flow;
        } else if typical[i] < typical[i - 1] {
            negative[i] = flow;
        }
    }

    for i in first..n {
        let start = i + 1 - window;
        let sum_pos: f64 = positive[start..=i].iter().sum();
        let sum_neg: f64 = negative[start..=i].iter().sum();
        out[i] = ratio_index(sum_pos, sum_neg);
    }
    out
}
