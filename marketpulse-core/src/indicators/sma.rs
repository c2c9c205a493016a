//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! First defined value at index window-1.

use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::Series;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    name: String,
}

impl Sma {
    pub fn new(window: usize) -> Result<Self, EngineError> {
        ensure_window(window, "SMA")?;
        Ok(Self {
            window,
            name: format!("sma_{window}"),
        })
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError> {
        ensure_non_empty(series)?;
        Ok(sma_of_series(&series.closes(), self.window))
    }
}

/// Rolling mean over a raw f64 slice. Positions before the window fills
/// are NaN; a slice shorter than the window is all NaN.
///
/// Used internally by Bollinger, ATR, trend detection, and pattern
/// recognition, which need SMAs of series other than close.
pub fn sma_of_series(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window || window == 0 {
        return result;
    }

    let mut sum: f64 = values.iter().take(window).sum();
    result[window - 1] = sum / window as f64;

    for i in window..n {
        sum = sum - values[i - window] + values[i];
        result[i] = sum / window as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn sma_3_spec_example() {
        // Closes [10, 11, 12, 11, 10]: NaN, NaN, 11.0, 11.333..., 11.0
        let series = make_series(&[10.0, 11.0, 12.0, 11.0, 10.0]);
        let result = Sma::new(3).unwrap().compute(&series).unwrap();

        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 34.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 11.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_window_equals_length_single_value() {
        let series = make_series(&[10.0, 20.0, 30.0]);
        let result = Sma::new(3).unwrap().compute(&series).unwrap();
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 20.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_short_series_all_undefined() {
        let series = make_series(&[10.0, 11.0, 12.0]);
        let result = Sma::new(5).unwrap().compute(&series).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sma_1_is_close() {
        let series = make_series(&[100.0, 200.0, 300.0]);
        let result = Sma::new(1).unwrap().compute(&series).unwrap();
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_constant_series_is_constant() {
        let series = make_series(&[42.0; 6]);
        let result = Sma::new(4).unwrap().compute(&series).unwrap();
        for v in &result[3..] {
            assert_approx(*v, 42.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn sma_empty_series_errors() {
        let series = crate::domain::Series::new(vec![]);
        let err = Sma::new(3).unwrap().compute(&series).unwrap_err();
        assert_eq!(err, EngineError::EmptySeries);
    }

    #[test]
    fn sma_zero_window_rejected() {
        assert!(matches!(
            Sma::new(0),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn sma_lookback() {
        assert_eq!(Sma::new(20).unwrap().lookback(), 19);
        assert_eq!(Sma::new(1).unwrap().lookback(), 0);
    }
}
