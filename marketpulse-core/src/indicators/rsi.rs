//! Relative Strength Index (RSI).
//!
//! Wilder-style smoothing of average gains and losses over close deltas.
//! The averages are seeded by the simple mean of the first `window` deltas,
//! then updated as avg[i] = (avg[i-1]*(window-1) + value[i]) / window.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss). Lookback: window (deltas
//! start at index 1).
//!
//! Degenerate cases: avg_loss == 0 with avg_gain > 0 is RSI = 100 by
//! definition, not a fault. Both averages zero (no price movement at all)
//! is undefined — NaN, not 100.

use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::Series;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Rsi {
    window: usize,
    name: String,
}

impl Rsi {
    pub const DEFAULT_WINDOW: usize = 14;

    pub fn new(window: usize) -> Result<Self, EngineError> {
        ensure_window(window, "RSI")?;
        Ok(Self {
            window,
            name: format!("rsi_{window}"),
        })
    }
}

impl Indicator for Rsi {
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
        let mut result = vec![f64::NAN; n];

        if n < self.window + 1 {
            return Ok(result);
        }

        // Seed: simple mean of gains/losses over the first `window` deltas.
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=self.window {
            let delta = closes[i] - closes[i - 1];
            if delta > 0.0 {
                avg_gain += delta;
            } else {
                avg_loss -= delta;
            }
        }
        avg_gain /= self.window as f64;
        avg_loss /= self.window as f64;

        result[self.window] = rsi_value(avg_gain, avg_loss);

        let w = self.window as f64;
        for i in (self.window + 1)..n {
            let delta = closes[i] - closes[i - 1];
            let gain = delta.max(0.0);
            let loss = (-delta).max(0.0);

            avg_gain = (avg_gain * (w - 1.0) + gain) / w;
            avg_loss = (avg_loss * (w - 1.0) + loss) / w;

            result[i] = rsi_value(avg_gain, avg_loss);
        }

        Ok(result)
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            // No price movement at all: undefined, not 100.
            f64::NAN
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
