//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: SMA(close, window)
//! - Upper: middle + num_std * stddev(close, window)
//! - Lower: middle - num_std * stddev(close, window)
//!
//! Uses the sample standard deviation (divide by N-1), the same convention
//! as the volatility indicator. A window of 1 therefore has no defined
//! deviation: middle is the close itself, upper/lower are NaN.
//! Lookback: window - 1.

use super::sma::sma_of_series;
use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::Series;
use crate::error::EngineError;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    window: usize,
    num_std: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub const DEFAULT_WINDOW: usize = 20;
    pub const DEFAULT_NUM_STD: f64 = 2.0;

    pub fn upper(window: usize, num_std: f64) -> Result<Self, EngineError> {
        Self::build(window, num_std, BollingerBand::Upper, "upper")
    }

    pub fn middle(window: usize, num_std: f64) -> Result<Self, EngineError> {
        Self::build(window, num_std, BollingerBand::Middle, "middle")
    }

    pub fn lower(window: usize, num_std: f64) -> Result<Self, EngineError> {
        Self::build(window, num_std, BollingerBand::Lower, "lower")
    }

    fn build(
        window: usize,
        num_std: f64,
        band: BollingerBand,
        label: &str,
    ) -> Result<Self, EngineError> {
        ensure_window(window, "Bollinger")?;
        if num_std <= 0.0 {
            return Err(EngineError::InvalidParameter(format!(
                "Bollinger band multiplier must be positive, got {num_std}"
            )));
        }
        Ok(Self {
            window,
            num_std,
            band,
            name: format!("bollinger_{label}_{window}"),
        })
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError> {
        ensure_non_empty(series)?;

        let closes = series.closes();
        let middle = sma_of_series(&closes, self.window);

        if self.band == BollingerBand::Middle {
            return Ok(middle);
        }

        let std = rolling_sample_std(&closes, self.window);
        let result = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| match self.band {
                BollingerBand::Upper => m + self.num_std * s,
                BollingerBand::Lower => m - self.num_std * s,
                BollingerBand::Middle => unreachable!(),
            })
            .collect();

        Ok(result)
    }
}

/// Rolling sample standard deviation (N-1 denominator) over a trailing
/// window. NaN before the window fills, and everywhere for window < 2.
pub(crate) fn rolling_sample_std(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window || window < 2 {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let variance = slice
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / (window as f64 - 1.0);
        result[i] = variance.sqrt();
    }

    result
}
