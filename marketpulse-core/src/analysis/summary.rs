//! Full technical summary for one series.
//!
//! One request computes the standard indicator battery (moving averages,
//! RSI, MACD, Bollinger, volatility, support/resistance, trend) and folds
//! the latest values into a serializable report with human-readable
//! signal strings. Indicator groups are independent pure functions over
//! the same immutable series, so they run under `rayon::join`.

use super::{last_defined, previous_defined, Bias};
use crate::domain::{Granularity, Series};
use crate::error::EngineError;
use crate::indicators::macd::macd_components;
use crate::indicators::sma::sma_of_series;
use crate::indicators::{
    support_resistance, Bollinger, Indicator, Macd, Rsi, Trend, Volatility,
};
use serde::{Deserialize, Serialize};

/// Overbought/oversold RSI thresholds.
const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// Pivot scan defaults for the support/resistance section.
const LEVEL_WINDOW: usize = 20;
const LEVEL_SENSITIVITY: f64 = 0.03;

/// Latest values of the standard indicator battery. `None` means the
/// series was too short for that indicator's warm-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryIndicators {
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub volatility_annualized: Option<f64>,
}

/// Composite technical report for one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSummary {
    pub last_price: f64,
    pub overall_bias: Bias,
    pub signals: Vec<String>,
    pub indicators: SummaryIndicators,
    pub nearest_support: Option<f64>,
    pub nearest_resistance: Option<f64>,
}

impl TechnicalSummary {
    pub fn compute(series: &Series, granularity: Granularity) -> Result<Self, EngineError> {
        let last_price = series.last().ok_or(EngineError::EmptySeries)?.close;
        let closes = series.closes();

        // Four independent indicator groups over the same immutable input.
        let ((averages, oscillators), (bands, structure)) = rayon::join(
            || {
                rayon::join(
                    || MovingAverages::compute(&closes),
                    || Oscillators::compute(series, &closes),
                )
            },
            || {
                rayon::join(
                    || BandsAndVol::compute(series, granularity),
                    || Structure::compute(series),
                )
            },
        );
        let oscillators = oscillators?;
        let bands = bands?;
        let structure = structure?;

        let mut signals = Vec::new();
        averages.price_signals(last_price, &mut signals);
        oscillators.signals(&mut signals);
        bands.price_signals(last_price, &mut signals);

        let overall_bias = Bias::from_direction(structure.trend_direction);

        Ok(TechnicalSummary {
            last_price,
            overall_bias,
            signals,
            indicators: SummaryIndicators {
                sma_20: last_defined(&averages.sma_20),
                sma_50: last_defined(&averages.sma_50),
                sma_200: last_defined(&averages.sma_200),
                ema_12: averages.ema_12,
                ema_26: averages.ema_26,
                rsi_14: oscillators.rsi_14,
                macd: oscillators.macd,
                macd_signal: oscillators.macd_signal,
                bb_upper: bands.upper,
                bb_middle: bands.middle,
                bb_lower: bands.lower,
                volatility_annualized: bands.volatility,
            },
            nearest_support: structure.nearest_support,
            nearest_resistance: structure.nearest_resistance,
        })
    }
}

struct MovingAverages {
    sma_20: Vec<f64>,
    sma_50: Vec<f64>,
    sma_200: Vec<f64>,
    ema_12: Option<f64>,
    ema_26: Option<f64>,
}

impl MovingAverages {
    fn compute(closes: &[f64]) -> Self {
        use crate::indicators::ema::ema_of_series;
        Self {
            sma_20: sma_of_series(closes, 20),
            sma_50: sma_of_series(closes, 50),
            sma_200: sma_of_series(closes, 200),
            ema_12: last_defined(&ema_of_series(closes, 12)),
            ema_26: last_defined(&ema_of_series(closes, 26)),
        }
    }

    fn price_signals(&self, last_price: f64, signals: &mut Vec<String>) {
        for (values, label, horizon) in [
            (&self.sma_20, "SMA(20)", "short-term"),
            (&self.sma_50, "SMA(50)", "medium-term"),
            (&self.sma_200, "SMA(200)", "long-term"),
        ] {
            if let Some(sma) = last_defined(values) {
                let side = if last_price > sma { "above" } else { "below" };
                let tone = if last_price > sma { "bullish" } else { "bearish" };
                signals.push(format!("Price {side} {label} - {horizon} {tone}"));
            }
        }

        // Golden/death cross on the last two positions of the 50/200 pair.
        if let (Some(s50), Some(s200), Some(p50), Some(p200)) = (
            last_defined(&self.sma_50),
            last_defined(&self.sma_200),
            previous_defined(&self.sma_50),
            previous_defined(&self.sma_200),
        ) {
            if s50 > s200 && p50 <= p200 {
                signals.push("Golden cross (SMA50 crossed above SMA200) - major bullish signal".into());
            } else if s50 < s200 && p50 >= p200 {
                signals.push("Death cross (SMA50 crossed below SMA200) - major bearish signal".into());
            }
        }
    }
}

struct Oscillators {
    rsi_14: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    macd_prev: Option<f64>,
    macd_signal_prev: Option<f64>,
}

impl Oscillators {
    fn compute(series: &Series, closes: &[f64]) -> Result<Self, EngineError> {
        let rsi = Rsi::new(Rsi::DEFAULT_WINDOW)?.compute(series)?;
        let (line, signal, _) = macd_components(
            closes,
            Macd::DEFAULT_FAST,
            Macd::DEFAULT_SLOW,
            Macd::DEFAULT_SIGNAL,
        );
        Ok(Self {
            rsi_14: last_defined(&rsi),
            macd: last_defined(&line),
            macd_signal: last_defined(&signal),
            macd_prev: previous_defined(&line),
            macd_signal_prev: previous_defined(&signal),
        })
    }

    fn signals(&self, signals: &mut Vec<String>) {
        if let Some(rsi) = self.rsi_14 {
            if rsi > RSI_OVERBOUGHT {
                signals.push("RSI above 70 - overbought condition".into());
            } else if rsi < RSI_OVERSOLD {
                signals.push("RSI below 30 - oversold condition".into());
            }
        }

        if let (Some(m), Some(s), Some(pm), Some(ps)) = (
            self.macd,
            self.macd_signal,
            self.macd_prev,
            self.macd_signal_prev,
        ) {
            if m > s && pm <= ps {
                signals.push("MACD bullish crossover - buy signal".into());
            } else if m < s && pm >= ps {
                signals.push("MACD bearish crossover - sell signal".into());
            }
        }
    }
}

struct BandsAndVol {
    upper: Option<f64>,
    middle: Option<f64>,
    lower: Option<f64>,
    volatility: Option<f64>,
}

impl BandsAndVol {
    fn compute(series: &Series, granularity: Granularity) -> Result<Self, EngineError> {
        let window = Bollinger::DEFAULT_WINDOW;
        let mult = Bollinger::DEFAULT_NUM_STD;
        let upper = Bollinger::upper(window, mult)?.compute(series)?;
        let middle = Bollinger::middle(window, mult)?.compute(series)?;
        let lower = Bollinger::lower(window, mult)?.compute(series)?;
        let vol = Volatility::annualized(Volatility::DEFAULT_WINDOW, granularity)?
            .compute(series)?;
        Ok(Self {
            upper: last_defined(&upper),
            middle: last_defined(&middle),
            lower: last_defined(&lower),
            volatility: last_defined(&vol),
        })
    }

    fn price_signals(&self, last_price: f64, signals: &mut Vec<String>) {
        if let (Some(upper), Some(lower)) = (self.upper, self.lower) {
            if last_price > upper {
                signals.push("Price above upper Bollinger band - overbought or strong trend".into());
            } else if last_price < lower {
                signals.push("Price below lower Bollinger band - oversold or strong trend".into());
            }
        }
    }
}

struct Structure {
    trend_direction: f64,
    nearest_support: Option<f64>,
    nearest_resistance: Option<f64>,
}

impl Structure {
    fn compute(series: &Series) -> Result<Self, EngineError> {
        let trend = Trend::direction(Trend::DEFAULT_SHORT, Trend::DEFAULT_LONG)?
            .compute(series)?;
        let levels = support_resistance(series, LEVEL_WINDOW, LEVEL_SENSITIVITY)?;
        let last_price = series.last().map(|b| b.close).unwrap_or(f64::NAN);
        Ok(Self {
            trend_direction: trend.last().copied().unwrap_or(0.0),
            nearest_support: levels.nearest_support(last_price),
            nearest_resistance: levels.nearest_resistance(last_price),
        })
    }
}
