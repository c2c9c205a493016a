//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|),
//! TR[0] = high[0] - low[0] (no previous close).
//! ATR is the rolling mean (SMA) of the true range.
//! Lookback: window - 1.

use super::sma::sma_of_series;
use super::{ensure_non_empty, ensure_window, Indicator};
use crate::domain::{Bar, Series};
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Atr {
    window: usize,
    name: String,
}

impl Atr {
    pub const DEFAULT_WINDOW: usize = 14;

    pub fn new(window: usize) -> Result<Self, EngineError> {
        ensure_window(window, "ATR")?;
        Ok(Self {
            window,
            name: format!("atr_{window}"),
        })
    }
}

/// Compute the True Range series from bars.
/// TR[0] = high[0] - low[0]; TR[t] incorporates the previous close.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = Vec::with_capacity(n);

    if n == 0 {
        return tr;
    }

    tr.push(bars[0].high - bars[0].low);
    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }

    tr
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window - 1
    }

    fn compute(&self, series: &Series) -> Result<Vec<f64>, EngineError> {
        ensure_non_empty(series)?;
        let tr = true_range(series.bars());
        Ok(sma_of_series(&tr, self.window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, make_series, DEFAULT_EPSILON};

    #[test]
    fn true_range_first_bar_is_high_minus_low() {
        let bars = make_bars(&[10.0, 11.0, 9.0]);
        let tr = true_range(&bars);
        assert_approx(tr[0], bars[0].high - bars[0].low, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_uses_previous_close() {
        // Gap up: bar 1 low (9.5) above bar 0 close (8.0).
        let bars = vec![
            bar(8.0, 8.5, 7.5, 8.0),
            bar(9.5, 10.0, 9.5, 9.8),
        ];
        let tr = true_range(&bars);
        // max(10.0-9.5, |10.0-8.0|, |9.5-8.0|) = 2.0
        assert_approx(tr[1], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_window_1_is_true_range() {
        let series = make_series(&[10.0, 12.0, 11.0]);
        let atr = Atr::new(1).unwrap().compute(&series).unwrap();
        let tr = true_range(series.bars());
        for i in 0..3 {
            assert_approx(atr[i], tr[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn atr_is_sma_of_true_range() {
        let series = make_series(&[10.0, 12.0, 11.0, 13.0, 12.5]);
        let atr = Atr::new(3).unwrap().compute(&series).unwrap();
        let tr = true_range(series.bars());

        assert!(atr[0].is_nan());
        assert!(atr[1].is_nan());
        assert_approx(atr[2], (tr[0] + tr[1] + tr[2]) / 3.0, DEFAULT_EPSILON);
        assert_approx(atr[4], (tr[2] + tr[3] + tr[4]) / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_non_negative() {
        let series = make_series(&[10.0, 9.0, 11.0, 8.0, 12.0, 10.5]);
        let atr = Atr::new(2).unwrap().compute(&series).unwrap();
        for v in atr.iter().filter(|v| !v.is_nan()) {
            assert!(*v >= 0.0);
        }
    }

    #[test]
    fn atr_empty_series_errors() {
        let series = crate::domain::Series::new(vec![]);
        let err = Atr::new(14).unwrap().compute(&series).unwrap_err();
        assert_eq!(err, EngineError::EmptySeries);
    }

    fn bar(open: f64, high: f64, low: f64, close: f64) -> crate::domain::Bar {
        use chrono::TimeZone;
        crate::domain::Bar {
            timestamp: chrono::Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1000,
        }
    }
}
