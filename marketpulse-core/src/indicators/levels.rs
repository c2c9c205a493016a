//! Support and resistance levels from pivot scans.
//!
//! A position is a resistance pivot when its high strictly exceeds the
//! high at every one of the `window` positions before AND after it;
//! support pivots are the symmetric local minima of the low. A new pivot
//! is discarded when it lies within `sensitivity` fractional distance of a
//! level already recorded. O(n * window) scan; fine at this scale.

use super::{ensure_non_empty, ensure_window};
use crate::domain::Series;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Distinct support and resistance price levels, each sorted ascending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

impl PriceLevels {
    /// Highest support strictly below the given price.
    pub fn nearest_support(&self, price: f64) -> Option<f64> {
        self.support
            .iter()
            .copied()
            .filter(|level| *level < price)
            .fold(None, |acc, level| Some(acc.map_or(level, |prev| prev.max(level))))
    }

    /// Lowest resistance strictly above the given price.
    pub fn nearest_resistance(&self, price: f64) -> Option<f64> {
        self.resistance
            .iter()
            .copied()
            .filter(|level| *level > price)
            .fold(None, |acc, level| Some(acc.map_or(level, |prev| prev.min(level))))
    }
}

/// Detect support/resistance levels over the full series.
pub fn support_resistance(
    series: &Series,
    window: usize,
    sensitivity: f64,
) -> Result<PriceLevels, EngineError> {
    ensure_non_empty(series)?;
    ensure_window(window, "support/resistance")?;
    if sensitivity < 0.0 {
        return Err(EngineError::InvalidParameter(format!(
            "sensitivity must be non-negative, got {sensitivity}"
        )));
    }

    let bars = series.bars();
    let n = bars.len();
    let mut resistance: Vec<f64> = Vec::new();
    let mut support: Vec<f64> = Vec::new();

    if n > 2 * window {
        for i in window..(n - window) {
            let high = bars[i].high;
            let is_pivot_high = (1..=window)
                .all(|j| high > bars[i - j].high && high > bars[i + j].high);
            if is_pivot_high && !near_existing(&resistance, high, sensitivity) {
                resistance.push(high);
            }

            let low = bars[i].low;
            let is_pivot_low =
                (1..=window).all(|j| low < bars[i - j].low && low < bars[i + j].low);
            if is_pivot_low && !near_existing(&support, low, sensitivity) {
                support.push(low);
            }
        }
    }

    support.sort_by(|a, b| a.total_cmp(b));
    resistance.sort_by(|a, b| a.total_cmp(b));

    Ok(PriceLevels {
        support,
        resistance,
    })
}

fn near_existing(levels: &[f64], candidate: f64, sensitivity: f64) -> bool {
    levels
        .iter()
        .any(|level| ((candidate - level) / level).abs() < sensitivity)
}
