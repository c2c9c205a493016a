//! Composite analysis builders on top of the indicator engine.
//!
//! These are the "summary" views callers ask for in one request. They
//! compute several independent indicators over the same immutable series
//! (in parallel — nothing is shared or mutated) and fold the results into
//! a single serializable report. Undefined indicator values surface as
//! `None`, never as zero.

pub mod summary;
pub mod trend_report;

pub use summary::{SummaryIndicators, TechnicalSummary};
pub use trend_report::{SignalEvent, TrendReport};

use serde::{Deserialize, Serialize};

/// Directional read of a series, derived from the trend indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    /// Map a trend-direction value (+1 / -1 / 0) to a bias.
    pub(crate) fn from_direction(direction: f64) -> Self {
        if direction > 0.0 {
            Bias::Bullish
        } else if direction < 0.0 {
            Bias::Bearish
        } else {
            Bias::Neutral
        }
    }
}

/// Last value of an aligned indicator series, with NaN mapped to None.
pub(crate) fn last_defined(values: &[f64]) -> Option<f64> {
    values.last().copied().filter(|v| !v.is_nan())
}

/// Value at `len - 2`, with NaN mapped to None. Used for crossover checks
/// on the final position.
pub(crate) fn previous_defined(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let v = values[values.len() - 2];
    (!v.is_nan()).then_some(v)
}
