//! Moving Average Convergence Divergence (MACD).
//!
//! line      = EMA(fast, close) - EMA(slow, close)
//! signal    = EMA(signal_window) of the line
//! histogram = line - signal
//!
//! Both EMAs are seeded from the first value (see `ema`), so all three
//! output series are defined at every position; early values are not
//! representative until the slow EMA has real history behind it.
//!
//! Three output series, exposed as separate `Indicator` instances per
//! series (same shape as Bollinger's bands).

use super::ema::ema_of_series;
use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::Series;
use crate::error::EngineError;

/// Which MACD output series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdSeries {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    output: MacdSeries,
    name: String,
}

impl Macd {
    pub const DEFAULT_FAST: usize = 12;
    pub const DEFAULT_SLOW: usize = 26;
    pub const DEFAULT_SIGNAL: usize = 9;

    pub fn line(fast: usize, slow: usize, signal: usize) -> Result<Self, EngineError> {
        Self::build(fast, slow, signal, MacdSeries::Line, "macd_line")
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Result<Self, EngineError> {
        Self::build(fast, slow, signal, MacdSeries::Signal, "macd_signal")
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Result<Self, EngineError> {
        Self::build(fast, slow, signal, MacdSeries::Histogram, "macd_histogram")
    }

    fn build(
        fast: usize,
        slow: usize,
        signal: usize,
        output: MacdSeries,
        label: &str,
    ) -> Result<Self, EngineError> {
        ensure_window(fast, "MACD fast")?;
        ensure_window(slow, "MACD slow")?;
        ensure_window(signal, "MACD signal")?;
        if fast >= slow {
            return Err(EngineError::InvalidParameter(format!(
                "MACD fast window ({fast}) must be shorter than slow window ({slow})"
            )));
        }
        Ok(Self {
            fast,
            slow,
            signal,
            output,
            name: format!("{label}_{fast}_{slow}_{signal}"),
        })
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError> {
        ensure_non_empty(series)?;

        let closes = series.closes();
        let (line, signal, histogram) =
            macd_components(&closes, self.fast, self.slow, self.signal);

        Ok(match self.output {
            MacdSeries::Line => line,
            MacdSeries::Signal => signal,
            MacdSeries::Histogram => histogram,
        })
    }
}

/// All three MACD series at once, for callers (the composite summary) that
/// need them together without recomputing the EMAs per series.
pub fn macd_components(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_window: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let fast_ema = ema_of_series(closes, fast);
    let slow_ema = ema_of_series(closes, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema_of_series(&line, signal_window);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

    (line, signal, histogram)
}
