//! Trend detection via moving average crossover.
//!
//! direction[t] = +1 when SMA(short) > SMA(long), -1 when <, else 0.
//! Positions where either SMA is still warming up are neutral (0), not NaN,
//! so the series is always fully defined.
//!
//! crossover[t] = +1 when direction flips from <= 0 to > 0 at t, -1 on the
//! opposite flip, else 0.
//!
//! Two output series, exposed as separate `Indicator` instances.

use super::sma::sma_of_series;
use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::Series;
use crate::error::EngineError;

/// Which trend output series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSeries {
    Direction,
    Crossover,
}

#[derive(Debug, Clone)]
pub struct Trend {
    short_window: usize,
    long_window: usize,
    output: TrendSeries,
    name: String,
}

impl Trend {
    pub const DEFAULT_SHORT: usize = 20;
    pub const DEFAULT_LONG: usize = 50;

    pub fn direction(short_window: usize, long_window: usize) -> Result<Self, EngineError> {
        Self::build(short_window, long_window, TrendSeries::Direction, "trend")
    }

    pub fn crossover(short_window: usize, long_window: usize) -> Result<Self, EngineError> {
        Self::build(
            short_window,
            long_window,
            TrendSeries::Crossover,
            "trend_signal",
        )
    }

    fn build(
        short_window: usize,
        long_window: usize,
        output: TrendSeries,
        label: &str,
    ) -> Result<Self, EngineError> {
        ensure_window(short_window, "trend short")?;
        ensure_window(long_window, "trend long")?;
        if short_window >= long_window {
            return Err(EngineError::InvalidParameter(format!(
                "trend short window ({short_window}) must be shorter than long window ({long_window})"
            )));
        }
        Ok(Self {
            short_window,
            long_window,
            output,
            name: format!("{label}_{short_window}_{long_window}"),
        })
    }

    fn directions(&self, series: &Series) -> Vec<f64> {
        let closes = series.closes();
        let short = sma_of_series(&closes, self.short_window);
        let long = sma_of_series(&closes, self.long_window);

        short
            .iter()
            .zip(&long)
            .map(|(s, l)| {
                if s.is_nan() || l.is_nan() {
                    0.0
                } else if s > l {
                    1.0
                } else if s < l {
                    -1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

impl Indicator for Trend {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.long_window - 1
    }

    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError> {
        ensure_non_empty(series)?;

        let direction = self.directions(series);
        match self.output {
            TrendSeries::Direction => Ok(direction),
            TrendSeries::Crossover => {
                let mut signal = vec![0.0; direction.len()];
                for i in 1..direction.len() {
                    if direction[i] > 0.0 && direction[i - 1] <= 0.0 {
                        signal[i] = 1.0;
                    } else if direction[i] < 0.0 && direction[i - 1] >= 0.0 {
                        signal[i] = -1.0;
                    }
                }
                Ok(signal)
            }
        }
    }
}
