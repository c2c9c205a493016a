//! Sampling granularity of a bar series.
//!
//! Supplied explicitly by the caller wherever it matters (volatility
//! annualization, synthetic bar spacing). Never inferred from data spacing.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// How often the series was sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Hourly,
    Minute,
}

impl Granularity {
    /// Sampling periods per trading year: 252 trading days,
    /// ~6.5 trading hours per day.
    pub fn periods_per_year(&self) -> f64 {
        match self {
            Granularity::Daily => 252.0,
            Granularity::Hourly => 252.0 * 6.5,
            Granularity::Minute => 252.0 * 6.5 * 60.0,
        }
    }

    /// Wall-clock spacing between consecutive bars at this granularity.
    pub fn bar_spacing(&self) -> Duration {
        match self {
            Granularity::Daily => Duration::days(1),
            Granularity::Hourly => Duration::hours(1),
            Granularity::Minute => Duration::minutes(1),
        }
    }
}
