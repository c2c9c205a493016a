//! Deterministic synthetic price data.
//!
//! A seeded random-walk provider for tests, benchmarks, and offline demo
//! runs. The per-symbol seed is derived from the master seed and the
//! symbol bytes, so the same (seed, symbol) pair always produces the same
//! series regardless of call order.

use super::provider::{DataError, PriceSeriesProvider};
use crate::domain::{Bar, Granularity, Series};
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Random-walk bar generator behind the `PriceSeriesProvider` trait.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    master_seed: u64,
    start_price: f64,
}

impl SyntheticProvider {
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            start_price: 100.0,
        }
    }

    pub fn with_start_price(mut self, start_price: f64) -> Self {
        self.start_price = start_price;
        self
    }

    fn seed_for(&self, symbol: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.master_seed.hash(&mut hasher);
        symbol.hash(&mut hasher);
        hasher.finish()
    }
}

impl PriceSeriesProvider for SyntheticProvider {
    fn fetch(
        &self,
        symbol: &str,
        lookback_bars: usize,
        granularity: Granularity,
    ) -> Result<Series, DataError> {
        if symbol.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if lookback_bars == 0 {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed_for(symbol));
        let spacing = granularity.bar_spacing();
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();

        let mut close = self.start_price;
        let mut bars = Vec::with_capacity(lookback_bars);
        for i in 0..lookback_bars {
            let open = close;
            let drift: f64 = rng.gen_range(-0.02..0.02);
            close = (open * (1.0 + drift)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.005));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.005));
            bars.push(Bar {
                timestamp: base + spacing * i as i32,
                open,
                high,
                low,
                close,
                volume: rng.gen_range(10_000..1_000_000),
            });
        }

        Ok(Series::new(bars))
    }
}
