//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (window + 1).
//!
//! Seeded from the very first value (EMA[0] = close[0]), so the output is
//! defined at every position with no warm-up gap. Early values lean heavily
//! on the seed and are only representative once roughly `window` bars have
//! passed; `lookback()` is 0 regardless.

use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::Series;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Ema {
    window: usize,
    name: String,
}

impl Ema {
    pub fn new(window: usize) -> Result<Self, EngineError> {
        ensure_window(window, "EMA")?;
        Ok(Self {
            window,
            name: format!("ema_{window}"),
        })
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError> {
        ensure_non_empty(series)?;
        Ok(ema_of_series(&series.closes(), self.window))
    }
}

/// EMA over a raw f64 slice, seeded from the first value.
///
/// Used by MACD, which needs EMAs of both close and of the MACD line
/// itself.
pub fn ema_of_series(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 || window == 0 {
        return result;
    }

    let alpha = 2.0 / (window as f64 + 1.0);

    let mut prev = values[0];
    result[0] = prev;
    for i in 1..n {
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ema;
        prev = ema;
    }

    result
}
