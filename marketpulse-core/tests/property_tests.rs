//! Property tests for indicator engine invariants.
//!
//! Uses proptest to verify:
//! 1. SMA and EMA stay within the bounds of the closes they average
//! 2. Bollinger band ordering (lower <= middle <= upper)
//! 3. RSI stays inside [0, 100] wherever defined
//! 4. MACD histogram identity holds at every position
//! 5. ATR is never negative
//! 6. Trend values are restricted to {-1, 0, +1}
//! 7. Output length always matches input length

use chrono::TimeZone;
use marketpulse_core::domain::{Bar, Series};
use marketpulse_core::indicators::{
    detect_divergence, Atr, Bollinger, Ema, Indicator, Macd, Rsi, Sma, Trend,
};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0),
        1..120,
    )
}

fn arb_window() -> impl Strategy<Value = usize> {
    1..30_usize
}

fn series_from(closes: &[f64]) -> Series {
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect();
    Series::new(bars)
}

proptest! {
    /// SMA values lie within [min, max] of the closes in their window.
    #[test]
    fn sma_bounded_by_window(closes in arb_closes(), window in arb_window()) {
        let series = series_from(&closes);
        let sma = Sma::new(window).unwrap().compute(&series).unwrap();
        prop_assert_eq!(sma.len(), closes.len());

        for (i, value) in sma.iter().enumerate() {
            if value.is_nan() {
                continue;
            }
            let slice = &closes[i + 1 - window..=i];
            let min = slice.iter().copied().fold(f64::INFINITY, f64::min);
            let max = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(*value >= min - 1e-9 && *value <= max + 1e-9);
        }
    }

    /// EMA is a convex combination of closes seen so far: bounded by the
    /// running min/max of the series prefix.
    #[test]
    fn ema_bounded_by_prefix(closes in arb_closes(), window in arb_window()) {
        let series = series_from(&closes);
        let ema = Ema::new(window).unwrap().compute(&series).unwrap();

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (i, value) in ema.iter().enumerate() {
            lo = lo.min(closes[i]);
            hi = hi.max(closes[i]);
            prop_assert!(*value >= lo - 1e-9 && *value <= hi + 1e-9);
        }
    }

    /// Bollinger bands are ordered wherever defined.
    #[test]
    fn bollinger_band_ordering(closes in arb_closes(), window in 2..30_usize) {
        let series = series_from(&closes);
        let upper = Bollinger::upper(window, 2.0).unwrap().compute(&series).unwrap();
        let middle = Bollinger::middle(window, 2.0).unwrap().compute(&series).unwrap();
        let lower = Bollinger::lower(window, 2.0).unwrap().compute(&series).unwrap();

        for i in 0..closes.len() {
            if upper[i].is_nan() || middle[i].is_nan() || lower[i].is_nan() {
                continue;
            }
            prop_assert!(lower[i] <= middle[i] + 1e-9);
            prop_assert!(middle[i] <= upper[i] + 1e-9);
        }
    }

    /// RSI stays in [0, 100] wherever defined.
    #[test]
    fn rsi_in_range(closes in arb_closes(), window in arb_window()) {
        let series = series_from(&closes);
        let rsi = Rsi::new(window).unwrap().compute(&series).unwrap();
        for value in rsi.iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0 + 1e-9).contains(value));
        }
    }

    /// histogram == line - signal at every position, by construction.
    #[test]
    fn macd_histogram_identity(closes in arb_closes()) {
        let series = series_from(&closes);
        let line = Macd::line(12, 26, 9).unwrap().compute(&series).unwrap();
        let signal = Macd::signal(12, 26, 9).unwrap().compute(&series).unwrap();
        let histogram = Macd::histogram(12, 26, 9).unwrap().compute(&series).unwrap();

        for i in 0..closes.len() {
            prop_assert!((histogram[i] - (line[i] - signal[i])).abs() < 1e-9);
        }
    }

    /// ATR is non-negative wherever defined.
    #[test]
    fn atr_non_negative(closes in arb_closes(), window in arb_window()) {
        let series = series_from(&closes);
        let atr = Atr::new(window).unwrap().compute(&series).unwrap();
        for value in atr.iter().filter(|v| !v.is_nan()) {
            prop_assert!(*value >= 0.0);
        }
    }

    /// Trend direction and crossover only ever emit -1, 0, or +1.
    #[test]
    fn trend_values_unit_set(closes in arb_closes()) {
        let series = series_from(&closes);
        for indicator in [Trend::direction(5, 10).unwrap(), Trend::crossover(5, 10).unwrap()] {
            let values = indicator.compute(&series).unwrap();
            prop_assert_eq!(values.len(), closes.len());
            for v in &values {
                prop_assert!(*v == 0.0 || *v == 1.0 || *v == -1.0);
            }
        }
    }

    /// Divergence flags are always aligned with the input length.
    #[test]
    fn divergence_output_aligned(closes in arb_closes(), window in arb_window()) {
        let series = series_from(&closes);
        let rsi = Rsi::new(14).unwrap().compute(&series).unwrap();
        let flags = detect_divergence(&series, &rsi, window).unwrap();
        prop_assert_eq!(flags.bullish.len(), closes.len());
        prop_assert_eq!(flags.bearish.len(), closes.len());
    }
}
