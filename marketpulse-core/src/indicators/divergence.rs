//! Price/indicator divergence detection.
//!
//! Bullish divergence at position i: close[i] is a strict local minimum
//! over the surrounding +/- `window` positions, yet the indicator sits
//! higher than it did at i - window and i - window/2 (price makes a lower
//! low the indicator does not confirm). Bearish divergence is the mirror
//! with local maxima and a lower indicator high.
//!
//! The indicator series must be positionally aligned with the bar series.
//! NaN indicator positions (warm-up) never flag: every comparison against
//! NaN is false.

use super::{ensure_non_empty, ensure_window};
use crate::domain::Series;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Per-bar divergence flags, aligned with series positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivergenceFlags {
    pub bullish: Vec<bool>,
    pub bearish: Vec<bool>,
}

/// Scan for divergences between price and an indicator series.
pub fn detect_divergence(
    series: &Series,
    indicator: &[f64],
    window: usize,
) -> Result<DivergenceFlags, EngineError> {
    ensure_non_empty(series)?;
    ensure_window(window, "divergence")?;
    if indicator.len() != series.len() {
        return Err(EngineError::InvalidParameter(format!(
            "indicator series length ({}) does not match bar series length ({})",
            indicator.len(),
            series.len()
        )));
    }

    let closes = series.closes();
    let n = closes.len();
    let mut bullish = vec![false; n];
    let mut bearish = vec![false; n];

    if n > 2 * window {
        let half = window / 2;
        for i in window..(n - window) {
            let c = closes[i];
            let before_min = fold_min(&closes[i - window..i]);
            let after_min = fold_min(&closes[i + 1..=i + window]);
            let before_max = fold_max(&closes[i - window..i]);
            let after_max = fold_max(&closes[i + 1..=i + window]);

            // Strict local minimum with the indicator refusing to confirm.
            if c < closes[i - 1]
                && c < closes[i + 1]
                && c < before_min
                && c < after_min
                && indicator[i] > indicator[i - window]
                && indicator[i] > indicator[i - half]
            {
                bullish[i] = true;
            }

            // Strict local maximum with the indicator making a lower high.
            if c > closes[i - 1]
                && c > closes[i + 1]
                && c > before_max
                && c > after_max
                && indicator[i] < indicator[i - window]
                && indicator[i] < indicator[i - half]
            {
                bearish[i] = true;
            }
        }
    }

    Ok(DivergenceFlags { bullish, bearish })
}

fn fold_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn fold_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
