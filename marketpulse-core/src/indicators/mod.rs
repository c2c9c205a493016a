//! The indicator engine: pure functions from a bar series to derived series.
//!
//! Aligned indicators implement the `Indicator` trait and produce a
//! `Vec<f64>` one-to-one with series positions, `f64::NAN` before the
//! warm-up window fills. Sparse outputs (support/resistance levels,
//! candlestick pattern flags, divergence flags) have their own typed
//! results and free functions.
//!
//! Multi-series indicators (MACD, Bollinger, trend) are exposed as separate
//! named instances per output series, keeping the single-series trait
//! unchanged.

pub mod atr;
pub mod bollinger;
pub mod divergence;
pub mod ema;
pub mod levels;
pub mod macd;
pub mod patterns;
pub mod rsi;
pub mod sma;
pub mod trend;
pub mod volatility;

pub use atr::{true_range, Atr};
pub use bollinger::{Bollinger, BollingerBand};
pub use divergence::{detect_divergence, DivergenceFlags};
pub use ema::Ema;
pub use levels::{support_resistance, PriceLevels};
pub use macd::{Macd, MacdSeries};
pub use patterns::{candlestick_patterns, PatternFlags};
pub use rsi::Rsi;
pub use sma::Sma;
pub use trend::{Trend, TrendSeries};
pub use volatility::Volatility;

use crate::domain::Series;
use crate::error::EngineError;

/// Trait for aligned indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values are `f64::NAN` (warm-up).
/// Every indicator is a pure function of its input: no I/O, no shared
/// state, deterministic given the series and parameters.
///
/// An empty series is a typed failure (`EngineError::EmptySeries`); a
/// non-empty series shorter than the warm-up window is not — the output is
/// simply all-NaN.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces its first
    /// defined value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire series.
    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError>;
}

/// Reject an empty series before any computation.
pub(crate) fn ensure_non_empty(series: &Series) -> Result<(), EngineError> {
    if series.is_empty() {
        Err(EngineError::EmptySeries)
    } else {
        Ok(())
    }
}

/// Validate a window parameter: zero is never meaningful.
pub(crate) fn ensure_window(window: usize, what: &str) -> Result<(), EngineError> {
    if window == 0 {
        Err(EngineError::InvalidParameter(format!(
            "{what} window must be >= 1"
        )))
    } else {
        Ok(())
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// `make_bars` wrapped into a `Series`.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> Series {
    Series::new(make_bars(closes))
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
