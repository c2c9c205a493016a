//! MarketPulse Core — one canonical technical-analysis engine.
//!
//! This crate consolidates what used to be several near-identical
//! stock-analysis servers into a single library:
//! - Domain types (bars, series, sampling granularity)
//! - The indicator engine: pure, stateless transforms from a price series
//!   to derived series (moving averages, oscillators, bands, volatility,
//!   levels, pattern and divergence flags)
//! - Composite analysis builders (technical summary, trend report)
//! - The data boundary: provider trait, CSV ingestion, synthetic data,
//!   and the watchlist quote cache
//!
//! The engine performs no I/O and holds no shared state; every call takes
//! an immutable series and returns fresh output, so concurrent use needs
//! no coordination.

pub mod analysis;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed across threads (rayon in the
    /// composite summary, any host's worker pool) are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Series>();
        require_sync::<domain::Series>();
        require_send::<analysis::TechnicalSummary>();
        require_sync::<analysis::TechnicalSummary>();
        require_send::<indicators::PriceLevels>();
        require_sync::<indicators::PriceLevels>();
        require_send::<error::EngineError>();
        require_sync::<error::EngineError>();
    }
}
