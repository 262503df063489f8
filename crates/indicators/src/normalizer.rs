//! Rolling percentile normalization.
//!
//! Maps any raw indicator series onto a 0-100 scale by ranking each value
//! against the defined values of its trailing window.

use ordered_float::OrderedFloat;
use sentiment_core::{is_defined, Direction, IndicatorSeries, UNDEFINED};

/// Sorted multiset of the defined values currently inside the window.
#[derive(Debug, Default)]
struct SortedWindow {
    values: Vec<OrderedFloat<f64>>,
}

impl SortedWindow {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    fn insert(&mut self, value: f64) {
        let value = OrderedFloat(value);
        let pos = self.values.partition_point(|v| *v < value);
        self.values.insert(pos, value);
    }

    fn remove(&mut self, value: f64) {
        if let Ok(pos) = self.values.binary_search(&OrderedFloat(value)) {
            self.values.remove(pos);
        }
    }

    /// Number of values `<= value`.
    fn count_le(&self, value: f64) -> usize {
        let value = OrderedFloat(value);
        self.values.partition_point(|v| *v <= value)
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Percentile rank of each value within its trailing `window` (inclusive of
/// itself), scaled to 0-100.
///
/// The output at `i` is undefined when fewer than `window` positions exist
/// up to `i`, when the value at `i` is undefined, or when the window holds
/// no defined values. Ties count as "not greater", so the current value
/// always ranks itself. With [`Direction::LowerIsBetter`] values are negated
/// before ranking; absent ties and with `m` defined values this gives
/// `down + up = 100 + 100 / m`, since the current value is counted in both.
pub fn rolling_percentile(series: &[f64], window: usize, direction: Direction) -> IndicatorSeries {
    let mut out = vec![UNDEFINED; series.len()];
    let sign = direction.sign();
    let mut sorted = SortedWindow::with_capacity(window);

    for (i, &value) in series.iter().enumerate() {
        if is_defined(value) {
            sorted.insert(value * sign);
        }
        if i >= window {
            let expired = series[i - window];
            if is_defined(expired) {
                sorted.remove(expired * sign);
            }
        }

        if i + 1 < window || !is_defined(value) || sorted.len() == 0 {
            continue;
        }
        out[i] = 100.0 * sorted.count_le(value * sign) as f64 / sorted.len() as f64;
    }
    out
}
