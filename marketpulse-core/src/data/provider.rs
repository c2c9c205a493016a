//! Price series provider trait and structured error types.
//!
//! The provider abstracts over data sources (CSV files, synthetic data,
//! whatever a host wires in) so callers and tests can swap
//! implementations. The contract: bars come back in ascending time order
//! with unique timestamps; the engine does not re-sort or de-duplicate.

use crate::domain::{Granularity, Series};
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no data for symbol '{symbol}' in the requested range")]
    NoData { symbol: String },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for price series providers.
///
/// `lookback_bars` is the number of most-recent bars requested at the
/// given sampling granularity. Implementations may return fewer when the
/// symbol's history is shorter; they must fail with `NoData` rather than
/// return an empty series.
pub trait PriceSeriesProvider: Send + Sync {
    fn fetch(
        &self,
        symbol: &str,
        lookback_bars: usize,
        granularity: Granularity,
    ) -> Result<Series, DataError>;

    /// Most recent price for a symbol. Default: the close of a one-bar fetch.
    fn latest_price(&self, symbol: &str) -> Result<f64, DataError> {
        let series = self.fetch(symbol, 1, Granularity::Daily)?;
        series
            .last()
            .map(|bar| bar.close)
            .ok_or_else(|| DataError::NoData {
                symbol: symbol.to_string(),
            })
    }
}
