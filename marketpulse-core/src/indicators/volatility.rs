//! Rolling volatility of log returns.
//!
//! log_return[t] = ln(close[t] / close[t-1]), undefined at t = 0.
//! volatility[t] = sample standard deviation of the trailing `window` log
//! returns. First defined value at index `window` (the return series
//! starts one position late).
//!
//! Annualization multiplies by sqrt(periods-per-year) for the sampling
//! granularity, which the caller supplies explicitly — it is never
//! inferred from timestamp spacing.

use super::bollinger::rolling_sample_std;
use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::{Granularity, Series};
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Volatility {
    window: usize,
    annualize: Option<Granularity>,
    name: String,
}

impl Volatility {
    pub const DEFAULT_WINDOW: usize = 20;

    /// Raw (per-period) volatility.
    pub fn raw(window: usize) -> Result<Self, EngineError> {
        ensure_window(window, "volatility")?;
        Ok(Self {
            window,
            annualize: None,
            name: format!("volatility_{window}"),
        })
    }

    /// Volatility scaled to an annual horizon for the given sampling
    /// granularity.
    pub fn annualized(window: usize, granularity: Granularity) -> Result<Self, EngineError> {
        ensure_window(window, "volatility")?;
        Ok(Self {
            window,
            annualize: Some(granularity),
            name: format!("volatility_annualized_{window}"),
        })
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError> {
        ensure_non_empty(series)?;

        let closes = series.closes();
        let n = closes.len();

        // Log returns, NaN at position 0. The NaN keeps every window that
        // reaches back to position 0 undefined, which is exactly the
        // warm-up semantics we want from the rolling std.
        let mut log_returns = vec![f64::NAN; n];
        for i in 1..n {
            log_returns[i] = (closes[i] / closes[i - 1]).ln();
        }

        let mut vol = rolling_sample_std(&log_returns, self.window);

        if let Some(granularity) = self.annualize {
            let factor = granularity.periods_per_year().sqrt();
            for v in &mut vol {
                *v *= factor;
            }
        }

        Ok(vol)
    }
}
