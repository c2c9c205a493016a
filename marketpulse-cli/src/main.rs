//! MarketPulse CLI — technical analysis over CSV or synthetic bar series.
//!
//! Commands:
//! - `indicator` — one indicator series by name, trailing points as JSON
//! - `summary` — composite technical summary
//! - `trend` — trend report with recent signal events
//! - `levels` — support/resistance levels
//! - `watch` — demo the watchlist quote cache against synthetic data
//!
//! Formatting (2-decimal rounding, last-N trimming, epoch-second
//! timestamps) happens here; the engine returns full-precision aligned
//! series and never trims.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::CliConfig;
use marketpulse_core::analysis::{TechnicalSummary, TrendReport};
use marketpulse_core::data::{read_series, PriceSeriesProvider, SyntheticProvider};
use marketpulse_core::data::{RefreshPolicy, Watchlist};
use marketpulse_core::domain::{Granularity, Series};
use marketpulse_core::indicators::{
    support_resistance, Atr, Bollinger, Ema, Indicator, Macd, Rsi, Sma, Trend, Volatility,
};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "marketpulse",
    about = "MarketPulse CLI — stock technical-analysis engine"
)]
struct Cli {
    /// Path to a TOML file with default windows and output settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the bar series comes from.
#[derive(Args, Clone)]
struct SourceArgs {
    /// CSV file with timestamp,open,high,low,close,volume rows.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Symbol for deterministic synthetic data (used when no CSV is given).
    #[arg(long)]
    symbol: Option<String>,

    /// Number of synthetic bars to generate.
    #[arg(long, default_value_t = 250)]
    bars: usize,

    /// Sampling granularity of the series.
    #[arg(long, value_enum, default_value_t = GranularityArg::Daily)]
    granularity: GranularityArg,

    /// Master seed for synthetic data.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl SourceArgs {
    fn load(&self) -> Result<Series> {
        if let Some(path) = &self.csv {
            return read_series(path).with_context(|| format!("loading {}", path.display()));
        }
        if let Some(symbol) = &self.symbol {
            return SyntheticProvider::new(self.seed)
                .fetch(symbol, self.bars, self.granularity.into())
                .with_context(|| format!("synthesizing series for {symbol}"));
        }
        bail!("either --csv or --symbol is required");
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GranularityArg {
    Daily,
    Hourly,
    Minute,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Daily => Granularity::Daily,
            GranularityArg::Hourly => Granularity::Hourly,
            GranularityArg::Minute => Granularity::Minute,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one indicator series and print its trailing points.
    Indicator {
        #[command(flatten)]
        source: SourceArgs,

        /// Indicator name: sma, ema, rsi, atr, volatility, macd_line,
        /// macd_signal, macd_histogram, bollinger_upper, bollinger_middle,
        /// bollinger_lower, trend, trend_signal.
        #[arg(long)]
        name: String,

        /// Window override (applies to single-window indicators).
        #[arg(long)]
        window: Option<usize>,

        /// Number of trailing points to print.
        #[arg(long)]
        points: Option<usize>,
    },
    /// Composite technical summary.
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Trend report with recent signal events.
    Trend {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of trailing bars to scan for events.
        #[arg(long)]
        lookback: Option<usize>,
    },
    /// Support and resistance levels.
    Levels {
        #[command(flatten)]
        source: SourceArgs,

        /// Pivot scan window.
        #[arg(long)]
        window: Option<usize>,

        /// Fractional distance below which nearby levels merge.
        #[arg(long)]
        sensitivity: Option<f64>,
    },
    /// Demo the watchlist quote cache against the synthetic provider.
    Watch {
        /// Symbols to track.
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Master seed for synthetic quotes.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Indicator {
            source,
            name,
            window,
            points,
        } => {
            let series = source.load()?;
            let values = compute_named(
                &name,
                window,
                source.granularity.into(),
                &config,
                &series,
            )?;
            let points = points.unwrap_or(config.points);
            json!({
                "indicator": name,
                "points": render_points(&series, &values, points),
            })
        }
        Commands::Summary { source } => {
            let series = source.load()?;
            let summary = TechnicalSummary::compute(&series, source.granularity.into())?;
            rounded(serde_json::to_value(&summary)?)
        }
        Commands::Trend { source, lookback } => {
            let series = source.load()?;
            let report =
                TrendReport::compute(&series, lookback.unwrap_or(config.trend_lookback))?;
            serde_json::to_value(&report)?
        }
        Commands::Levels {
            source,
            window,
            sensitivity,
        } => {
            let series = source.load()?;
            let levels = support_resistance(
                &series,
                window.unwrap_or(config.level_window),
                sensitivity.unwrap_or(config.level_sensitivity),
            )?;
            rounded(serde_json::to_value(&levels)?)
        }
        Commands::Watch { symbols, seed } => {
            let provider = SyntheticProvider::new(seed);
            let mut watchlist = Watchlist::new(RefreshPolicy::default());
            for symbol in &symbols {
                watchlist.add(symbol);
            }
            let failures = watchlist.refresh(&provider, chrono::Utc::now());
            for (symbol, err) in &failures {
                eprintln!("warning: {symbol}: {err}");
            }
            let quotes: Value = watchlist
                .symbols()
                .filter_map(|s| watchlist.quote(s).map(|q| (s.to_string(), q)))
                .map(|(s, q)| {
                    (
                        s,
                        json!({
                            "price": round2(q.price),
                            "fetched_at": q.fetched_at.timestamp(),
                        }),
                    )
                })
                .collect::<serde_json::Map<String, Value>>()
                .into();
            json!({ "quotes": quotes })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Resolve an indicator by CLI name and compute its aligned series.
fn compute_named(
    name: &str,
    window: Option<usize>,
    granularity: Granularity,
    config: &CliConfig,
    series: &Series,
) -> Result<Vec<f64>> {
    let indicator: Box<dyn Indicator> = match name {
        "sma" => Box::new(Sma::new(window.unwrap_or(config.sma_window))?),
        "ema" => Box::new(Ema::new(window.unwrap_or(config.ema_window))?),
        "rsi" => Box::new(Rsi::new(window.unwrap_or(config.rsi_window))?),
        "atr" => Box::new(Atr::new(window.unwrap_or(config.atr_window))?),
        "volatility" => Box::new(Volatility::annualized(
            window.unwrap_or(config.volatility_window),
            granularity,
        )?),
        "macd_line" => Box::new(Macd::line(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        )?),
        "macd_signal" => Box::new(Macd::signal(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        )?),
        "macd_histogram" => Box::new(Macd::histogram(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        )?),
        "bollinger_upper" => Box::new(Bollinger::upper(
            window.unwrap_or(config.bollinger_window),
            config.bollinger_num_std,
        )?),
        "bollinger_middle" => Box::new(Bollinger::middle(
            window.unwrap_or(config.bollinger_window),
            config.bollinger_num_std,
        )?),
        "bollinger_lower" => Box::new(Bollinger::lower(
            window.unwrap_or(config.bollinger_window),
            config.bollinger_num_std,
        )?),
        "trend" => Box::new(Trend::direction(config.trend_short, config.trend_long)?),
        "trend_signal" => Box::new(Trend::crossover(config.trend_short, config.trend_long)?),
        other => bail!("unknown indicator '{other}'"),
    };
    Ok(indicator.compute(series)?)
}

/// Trailing points as [{t, value}], undefined positions as null values.
fn render_points(series: &Series, values: &[f64], points: usize) -> Value {
    let n = values.len();
    let start = n.saturating_sub(points);
    let bars = series.bars();
    (start..n)
        .map(|i| {
            let value = if values[i].is_nan() {
                Value::Null
            } else {
                json!(round2(values[i]))
            };
            json!({ "t": bars[i].timestamp.timestamp(), "value": value })
        })
        .collect::<Vec<_>>()
        .into()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round every number in a JSON tree to 2 decimals.
fn rounded(mut value: Value) -> Value {
    fn walk(value: &mut Value) {
        match value {
            Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    if f.fract() != 0.0 {
                        if let Some(num) = serde_json::Number::from_f64(round2(f)) {
                            *value = Value::Number(num);
                        }
                    }
                }
            }
            Value::Array(items) => items.iter_mut().for_each(walk),
            Value::Object(map) => map.values_mut().for_each(walk),
            _ => {}
        }
    }
    walk(&mut value);
    value
}
