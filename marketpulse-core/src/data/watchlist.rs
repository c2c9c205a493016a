//! Watchlist quote cache with an explicit refresh policy.
//!
//! An owned object, not global state: the host process constructs it,
//! injects a provider at refresh time, and decides when refresh runs.
//! There is no background thread. Staleness is a visible property
//! (`is_stale`), and refresh only refetches entries older than the policy
//! interval. Per-symbol fetch failures are collected and returned; one bad
//! symbol never aborts the batch. The indicator engine knows nothing about
//! this cache.

use super::provider::{DataError, PriceSeriesProvider};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// When a cached quote is considered stale.
#[derive(Debug, Clone, Copy)]
pub struct RefreshPolicy {
    pub interval: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::seconds(30),
        }
    }
}

/// A cached last-known price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Symbol set plus last-known quotes.
#[derive(Debug)]
pub struct Watchlist {
    policy: RefreshPolicy,
    symbols: BTreeSet<String>,
    quotes: BTreeMap<String, Quote>,
}

impl Watchlist {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            symbols: BTreeSet::new(),
            quotes: BTreeMap::new(),
        }
    }

    /// Add a symbol. Returns false if it was already tracked.
    pub fn add(&mut self, symbol: &str) -> bool {
        self.symbols.insert(symbol.to_uppercase())
    }

    /// Remove a symbol and its cached quote. Returns false if untracked.
    pub fn remove(&mut self, symbol: &str) -> bool {
        let symbol = symbol.to_uppercase();
        self.quotes.remove(&symbol);
        self.symbols.remove(&symbol)
    }

    /// Tracked symbols, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Cached quote for a symbol, if any refresh has succeeded for it.
    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(&symbol.to_uppercase())
    }

    /// True when the symbol has no quote yet, or its quote is older than
    /// the policy interval.
    pub fn is_stale(&self, symbol: &str, now: DateTime<Utc>) -> bool {
        match self.quote(symbol) {
            Some(quote) => now - quote.fetched_at >= self.policy.interval,
            None => true,
        }
    }

    /// Refetch stale entries from the provider.
    ///
    /// Fresh entries are skipped. Failures are returned per symbol; the
    /// corresponding stale quotes (if any) are left in place.
    pub fn refresh(
        &mut self,
        provider: &dyn PriceSeriesProvider,
        now: DateTime<Utc>,
    ) -> Vec<(String, DataError)> {
        let stale: Vec<String> = self
            .symbols
            .iter()
            .filter(|s| self.is_stale(s, now))
            .cloned()
            .collect();

        let mut failures = Vec::new();
        for symbol in stale {
            match provider.latest_price(&symbol) {
                Ok(price) => {
                    self.quotes.insert(
                        symbol,
                        Quote {
                            price,
                            fetched_at: now,
                        },
                    );
                }
                Err(err) => failures.push((symbol, err)),
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::SyntheticProvider;

    fn now() -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap()
    }

    #[test]
    fn add_remove_normalizes_case() {
        let mut wl = Watchlist::new(RefreshPolicy::default());
        assert!(wl.add("spy"));
        assert!(!wl.add("SPY"));
        assert_eq!(wl.symbols().collect::<Vec<_>>(), vec!["SPY"]);
        assert!(wl.remove("Spy"));
        assert!(wl.is_empty());
    }

    #[test]
    fn unknown_symbol_is_stale() {
        let mut wl = Watchlist::new(RefreshPolicy::default());
        wl.add("SPY");
        assert!(wl.is_stale("SPY", now()));
    }

    #[test]
    fn refresh_populates_quotes() {
        let provider = SyntheticProvider::new(42);
        let mut wl = Watchlist::new(RefreshPolicy::default());
        wl.add("SPY");
        wl.add("QQQ");

        let failures = wl.refresh(&provider, now());
        assert!(failures.is_empty());
        assert!(wl.quote("SPY").is_some());
        assert!(wl.quote("QQQ").is_some());
        assert!(!wl.is_stale("SPY", now()));
    }

    #[test]
    fn fresh_quotes_not_refetched() {
        let provider = SyntheticProvider::new(42);
        let mut wl = Watchlist::new(RefreshPolicy {
            interval: Duration::seconds(30),
        });
        wl.add("SPY");

        wl.refresh(&provider, now());
        let first = *wl.quote("SPY").unwrap();

        // Ten seconds later: inside the interval, quote untouched.
        wl.refresh(&provider, now() + Duration::seconds(10));
        assert_eq!(*wl.quote("SPY").unwrap(), first);

        // Past the interval: refetched with a new fetched_at.
        wl.refresh(&provider, now() + Duration::seconds(31));
        assert_ne!(wl.quote("SPY").unwrap().fetched_at, first.fetched_at);
    }

    #[test]
    fn failures_reported_without_aborting_batch() {
        struct FailsFor(&'static str);
        impl PriceSeriesProvider for FailsFor {
            fn fetch(
                &self,
                symbol: &str,
                lookback_bars: usize,
                granularity: crate::domain::Granularity,
            ) -> Result<crate::domain::Series, DataError> {
                if symbol == self.0 {
                    return Err(DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    });
                }
                SyntheticProvider::new(1).fetch(symbol, lookback_bars, granularity)
            }
        }

        let mut wl = Watchlist::new(RefreshPolicy::default());
        wl.add("GOOD");
        wl.add("BAD");

        let failures = wl.refresh(&FailsFor("BAD"), now());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "BAD");
        assert!(wl.quote("GOOD").is_some());
        assert!(wl.quote("BAD").is_none());
    }
}
