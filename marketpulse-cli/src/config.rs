//! Optional TOML defaults for the CLI.
//!
//! Every field has a built-in default, so an empty or absent file is
//! fine; command-line flags override whatever the file says.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Trailing points printed for aligned indicator output.
    pub points: usize,

    pub sma_window: usize,
    pub ema_window: usize,
    pub rsi_window: usize,
    pub atr_window: usize,
    pub volatility_window: usize,

    pub bollinger_window: usize,
    pub bollinger_num_std: f64,

    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    pub trend_short: usize,
    pub trend_long: usize,
    pub trend_lookback: usize,

    pub level_window: usize,
    pub level_sensitivity: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            points: 30,
            sma_window: 20,
            ema_window: 20,
            rsi_window: 14,
            atr_window: 14,
            volatility_window: 20,
            bollinger_window: 20,
            bollinger_num_std: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            trend_short: 20,
            trend_long: 50,
            trend_lookback: 10,
            level_window: 20,
            level_sensitivity: 0.03,
        }
    }
}

impl CliConfig {
    /// Load from a TOML file, or fall back to defaults when no path is
    /// given. An explicitly named file that cannot be read or parsed is
    /// an error, not a silent fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))
            }
        }
    }
}
