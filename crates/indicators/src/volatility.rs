//! Dispersion-based indicators.
//!
//! Both indicators use the population standard deviation (divide by N) over
//! their trailing window.

use crate::moving_average::sma;
use crate::warmup::WarmUp;
use sentiment_core::{IndicatorSeries, UNDEFINED};
use statrs::statistics::Statistics;

/// Trading periods per year used to annualize realized volatility.
pub const ANNUALIZATION_PERIODS: f64 = 252.0;

/// Bollinger %B: position of the close inside `SMA ± k·σ`.
///
/// 0 is the lower band, 1 the upper band. A zero-width band yields 0.5.
pub fn bollinger_percent_b(close: &[f64], window: usize, k: f64) -> IndicatorSeries {
    let mut out = vec![UNDEFINED; close.len()];
    let first = WarmUp::window(window).first_index();
    if window == 0 || close.len() <= first {
        return out;
    }

    let mid = sma(close, window);
    for i in first..close.len() {
        let std = close[i + 1 - window..=i].iter().population_std_dev();
        let upper = mid[i] + k * std;
        let lower = mid[i] - k * std;

        out[i] = if upper != lower {
            (close[i] - lower) / (upper - lower)
        } else {
            0.5
        };
    }
    out
}

/// Annualized realized volatility of simple returns.
///
/// The value at index `i` covers the returns ending at `i - window + 1 ..= i`.
/// A return whose previous close is 0 counts as 0.
pub fn realized_volatility(close: &[f64], window: usize) -> IndicatorSeries {
    let mut out = vec![UNDEFINED; close.len()];
    let first = WarmUp::window_of_changes(window).first_index();
    if window == 0 || close.len() <= first {
        return out;
    }

    let mut returns = vec![0.0; close.len()];
    for i in 1..close.len() {
        if close[i - 1] != 0.0 {
            returns[i] = close[i] / close[i - 1] - 1.0;
        }
    }

    let annualize = ANNUALIZATION_PERIODS.sqrt();
    for i in first..close.len() {
        out[i] = returns[i + 1 - window..=i].iter().population_std_dev() * annualize;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_b_flat_band() {
        let out = bollinger_percent_b(&[100.0; 25], 20, 2.0);
        assert!(out[..19].iter().all(|v| v.is_nan()));
        assert_relative_eq!(out[19], 0.5);
        assert_relative_eq!(out[24], 0.5);
    }

    #[test]
    fn test_percent_b_known_value() {
        // window [1, 2, 3]: mean 2, population std sqrt(2/3)
        let out = bollinger_percent_b(&[1.0, 2.0, 3.0], 3, 2.0);
        let std = (2.0_f64 / 3.0).sqrt();
        let lower = 2.0 - 2.0 * std;
        let expected = (3.0 - lower) / (4.0 * std);
        assert_relative_eq!(out[2], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_percent_b_mid_band() {
        let out = bollinger_percent_b(&[1.0, 3.0, 2.0], 3, 2.0);
        assert_relative_eq!(out[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_percent_b_short() {
        assert!(bollinger_percent_b(&[1.0; 19], 20, 2.0).iter().all(|v| v.is_nan()));
        assert!(bollinger_percent_b(&[], 20, 2.0).is_empty());
    }

    #[test]
    fn test_volatility_constant_growth_is_zero() {
        let close: Vec<f64> = (0..30).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let out = realized_volatility(&close, 20);

        assert!(out[..20].iter().all(|v| v.is_nan()));
        assert!(out[20].abs() < 1e-9);
    }

    #[test]
    fn test_volatility_known_value() {
        // returns +10%, -10% -> population std 0.1
        let close = [100.0, 110.0, 99.0];
        let out = realized_volatility(&close, 2);
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 0.1 * 252.0_f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_volatility_zero_previous_close() {
        let close = [0.0, 5.0, 5.0];
        let out = realized_volatility(&close, 2);
        assert_relative_eq!(out[2], 0.0);
    }
}
