//! Trend report: dated signal events over the trailing bars.
//!
//! Combines trend crossovers, candlestick patterns, and RSI divergences
//! into per-bar event labels for the last `lookback_bars` positions,
//! plus an overall trend read for the whole series.

use super::Bias;
use crate::domain::Series;
use crate::error::EngineError;
use crate::indicators::{
    candlestick_patterns, detect_divergence, Indicator, Rsi, Trend,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of trailing bars to report on.
pub const DEFAULT_LOOKBACK_BARS: usize = 10;

/// Divergence pivot window (matches the RSI window it is scanned against).
const DIVERGENCE_WINDOW: usize = 14;

/// Signals observed at one bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    pub timestamp: DateTime<Utc>,
    pub labels: Vec<String>,
}

/// Trend read plus recent signal events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub overall_trend: Bias,
    pub events: Vec<SignalEvent>,
}

impl TrendReport {
    pub fn compute(series: &Series, lookback_bars: usize) -> Result<Self, EngineError> {
        if lookback_bars == 0 {
            return Err(EngineError::InvalidParameter(
                "trend report lookback must be >= 1".into(),
            ));
        }

        let direction = Trend::direction(Trend::DEFAULT_SHORT, Trend::DEFAULT_LONG)?
            .compute(series)?;
        let crossover = Trend::crossover(Trend::DEFAULT_SHORT, Trend::DEFAULT_LONG)?
            .compute(series)?;
        let patterns = candlestick_patterns(series)?;
        let rsi = Rsi::new(Rsi::DEFAULT_WINDOW)?.compute(series)?;
        let divergences = detect_divergence(series, &rsi, DIVERGENCE_WINDOW)?;

        let n = series.len();
        let start = n.saturating_sub(lookback_bars);
        let mut events = Vec::new();

        for i in start..n {
            let mut labels = Vec::new();

            if crossover[i] > 0.0 {
                labels.push("Bullish trend change".to_string());
            } else if crossover[i] < 0.0 {
                labels.push("Bearish trend change".to_string());
            }

            for pattern in patterns.at(i) {
                labels.push(format!("{} pattern", title_case(pattern)));
            }

            if divergences.bullish[i] {
                labels.push("Bullish divergence".to_string());
            } else if divergences.bearish[i] {
                labels.push("Bearish divergence".to_string());
            }

            if !labels.is_empty() {
                events.push(SignalEvent {
                    timestamp: series.bars()[i].timestamp,
                    labels,
                });
            }
        }

        let overall_trend = Bias::from_direction(direction.last().copied().unwrap_or(0.0));

        Ok(TrendReport {
            overall_trend,
            events,
        })
    }
}

fn title_case(label: &str) -> String {
    label
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
