//! Candlestick pattern recognition.
//!
//! Deterministic boolean predicates over one or two consecutive bars:
//!
//! - Doji: body < 0.1 * (high - low) AND body < 0.25 * the 14-period
//!   rolling average body. Positions where the average body is still
//!   warming up never flag.
//! - Hammer: lower shadow > 2 * body AND upper shadow < 0.2 * body,
//!   shadows measured against the body orientation (bullish or bearish).
//!   A zero-body bar has no orientation and never flags.
//! - Engulfing: the current real body fully engulfs the previous bar's
//!   body with opposite direction.

use super::ensure_non_empty;
use super::sma::sma_of_series;
use crate::domain::Series;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Window for the average body size used by the doji predicate.
const AVG_BODY_WINDOW: usize = 14;

/// Per-bar pattern flags, each vector aligned with series positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternFlags {
    pub doji: Vec<bool>,
    pub hammer: Vec<bool>,
    pub bullish_engulfing: Vec<bool>,
    pub bearish_engulfing: Vec<bool>,
}

impl PatternFlags {
    /// Names of the patterns flagged at one position.
    pub fn at(&self, i: usize) -> Vec<&'static str> {
        let mut hits = Vec::new();
        if self.doji.get(i).copied().unwrap_or(false) {
            hits.push("doji");
        }
        if self.hammer.get(i).copied().unwrap_or(false) {
            hits.push("hammer");
        }
        if self.bullish_engulfing.get(i).copied().unwrap_or(false) {
            hits.push("bullish_engulfing");
        }
        if self.bearish_engulfing.get(i).copied().unwrap_or(false) {
            hits.push("bearish_engulfing");
        }
        hits
    }
}

/// Scan the whole series for candlestick patterns.
pub fn candlestick_patterns(series: &Series) -> Result<PatternFlags, EngineError> {
    ensure_non_empty(series)?;

    let bars = series.bars();
    let n = bars.len();

    let body_sizes: Vec<f64> = bars.iter().map(|b| b.body().abs()).collect();
    let avg_body = sma_of_series(&body_sizes, AVG_BODY_WINDOW);

    let mut doji = vec![false; n];
    let mut hammer = vec![false; n];
    let mut bullish_engulfing = vec![false; n];
    let mut bearish_engulfing = vec![false; n];

    for i in 0..n {
        let bar = &bars[i];
        let body = body_sizes[i];

        // Doji: tiny body relative to both the bar's range and recent bodies.
        if !avg_body[i].is_nan() && body < 0.1 * bar.range() && body < 0.25 * avg_body[i] {
            doji[i] = true;
        }

        // Hammer: shadows relative to the body, oriented by bar direction.
        let shadows = if bar.close > bar.open {
            Some((bar.open - bar.low, bar.high - bar.close))
        } else if bar.open > bar.close {
            Some((bar.close - bar.low, bar.high - bar.open))
        } else {
            None
        };
        if let Some((lower_shadow, upper_shadow)) = shadows {
            if lower_shadow > 2.0 * body && upper_shadow < 0.2 * body {
                hammer[i] = true;
            }
        }

        if i == 0 {
            continue;
        }
        let prev = &bars[i - 1];

        // Bullish engulfing: bearish previous bar swallowed by a larger
        // bullish body.
        if bar.open < prev.close
            && bar.close > prev.open
            && bar.close > bar.open
            && prev.open > prev.close
        {
            bullish_engulfing[i] = true;
        }

        // Bearish engulfing: the mirror image.
        if bar.open > prev.close
            && bar.close < prev.open
            && bar.close < bar.open
            && prev.open < prev.close
        {
            bearish_engulfing[i] = true;
        }
    }

    Ok(PatternFlags {
        doji,
        hammer,
        bullish_engulfing,
        bearish_engulfing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, Series};
    use chrono::TimeZone;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            timestamp: chrono::Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1000,
        }
    }

    fn series_of(bars: Vec<Bar>) -> Series {
        Series::new(bars)
    }

    /// Fourteen unremarkable bars so the average-body window is warm.
    fn warmup_bars() -> Vec<Bar> {
        (0..14)
            .map(|i| {
                let base = 100.0 + i as f64 * 0.1;
                bar(base, base + 1.2, base - 1.2, base + 1.0)
            })
            .collect()
    }

    #[test]
    fn doji_detected_after_warmup() {
        let mut bars = warmup_bars();
        // Body 0.02 on a range of 2.0: well under both thresholds.
        bars.push(bar(101.0, 102.0, 100.0, 101.02));
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert!(flags.doji[14]);
    }

    #[test]
    fn doji_not_flagged_during_warmup() {
        // Identical doji-shaped bar, but inside the 14-bar warm-up.
        let bars = vec![bar(101.0, 102.0, 100.0, 101.02); 5];
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert!(flags.doji.iter().all(|d| !d));
    }

    #[test]
    fn hammer_bullish_body() {
        // Body 1.0, lower shadow 3.0, upper shadow 0.1.
        let bars = vec![bar(103.0, 104.1, 100.0, 104.0)];
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert!(flags.hammer[0]);
    }

    #[test]
    fn hammer_rejected_with_long_upper_shadow() {
        // Same body and lower shadow, upper shadow 0.5.
        let bars = vec![bar(103.0, 104.5, 100.0, 104.0)];
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert!(!flags.hammer[0]);
    }

    #[test]
    fn bullish_engulfing_detected() {
        let bars = vec![
            bar(102.0, 102.5, 100.5, 101.0), // bearish
            bar(100.5, 103.5, 100.0, 103.0), // bullish, engulfs previous body
        ];
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert!(flags.bullish_engulfing[1]);
        assert!(!flags.bearish_engulfing[1]);
    }

    #[test]
    fn bearish_engulfing_detected() {
        let bars = vec![
            bar(101.0, 102.5, 100.5, 102.0), // bullish
            bar(102.5, 103.0, 100.0, 100.5), // bearish, engulfs previous body
        ];
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert!(flags.bearish_engulfing[1]);
        assert!(!flags.bullish_engulfing[1]);
    }

    #[test]
    fn first_bar_never_engulfing() {
        let bars = vec![bar(100.5, 103.5, 100.0, 103.0)];
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert!(!flags.bullish_engulfing[0]);
        assert!(!flags.bearish_engulfing[0]);
    }

    #[test]
    fn flags_at_collects_names() {
        let bars = vec![
            bar(102.0, 102.5, 100.5, 101.0),
            bar(100.5, 103.5, 100.0, 103.0),
        ];
        let flags = candlestick_patterns(&series_of(bars)).unwrap();
        assert_eq!(flags.at(1), vec!["bullish_engulfing"]);
        assert!(flags.at(0).is_empty());
        assert!(flags.at(99).is_empty());
    }

    #[test]
    fn empty_series_errors() {
        assert_eq!(
            candlestick_patterns(&Series::new(vec![])).unwrap_err(),
            EngineError::EmptySeries
        );
    }
}
