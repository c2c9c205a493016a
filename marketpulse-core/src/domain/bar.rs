//! Bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol over a single sampled interval.
///
/// The engine operates on trusted input: indicator code assumes
/// `low <= open, close <= high` and does not re-check it. `is_sane` exists
/// for the ingestion boundary and for tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Basic OHLCV sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }

    /// Signed body: close - open. Positive for a bullish bar.
    pub fn body(&self) -> f64 {
        self.close - self.open
    }

    /// High - low for the interval.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
