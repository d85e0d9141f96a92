//! ROBX CLI: fetch a price series and print a trade signal.
//!
//! Commands:
//! - `signal`: evaluate one symbol and print a JSON report
//! - `scan`: evaluate several symbols in parallel and print a table
//! - `params`: print the effective signal parameters

mod config;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use robx_core::data::{CsvProvider, DataProvider, YahooProvider};
use robx_core::{InstrumentType, SignalEngine, SignalParameters, Timeframe};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;
use report::{table_header, SignalReport};

#[derive(Parser)]
#[command(name = "robx", about = "ROBX CLI: technical trade signals for OHLCV series")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one symbol and print the signal report as JSON.
    Signal {
        /// Symbol (e.g., PETR4.SA). Defaults to the configured asset for the instrument type.
        #[arg(long)]
        symbol: Option<String>,

        /// Instrument type: equity, mini_indice, mini_dolar.
        #[arg(long, default_value = "equity")]
        instrument: InstrumentType,

        /// Timeframe: 1m, 5m, 15m, 1h, 1d, 1wk, 1mo.
        #[arg(long, default_value = "1d")]
        timeframe: Timeframe,

        /// Read candles from <DIR>/<SYMBOL>.csv instead of Yahoo Finance.
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Also write the JSON report to this file.
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Evaluate several symbols in parallel and print a summary table.
    Scan {
        /// Symbols to evaluate. Defaults to the configured asset list.
        symbols: Vec<String>,

        /// Timeframe: 1m, 5m, 15m, 1h, 1d, 1wk, 1mo.
        #[arg(long, default_value = "1d")]
        timeframe: Timeframe,

        /// Read candles from <DIR>/<SYMBOL>.csv instead of Yahoo Finance.
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Print the effective signal parameters (config + flags + defaults).
    Params {
        #[command(flatten)]
        params: ParamArgs,
    },
}

/// Per-run overrides of the signal parameters.
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Short SMA window (default 14).
    #[arg(long)]
    short_window: Option<u32>,

    /// Long SMA window (default 50).
    #[arg(long)]
    long_window: Option<u32>,

    /// RSI smoothing period (default 14).
    #[arg(long)]
    rsi_period: Option<u32>,

    /// RSI level treated as overbought (default 70).
    #[arg(long)]
    rsi_overbought: Option<u32>,

    /// RSI level treated as oversold (default 30).
    #[arg(long)]
    rsi_oversold: Option<u32>,

    /// Volume SMA window (default 20).
    #[arg(long)]
    volume_window: Option<u32>,

    /// Volatility window in returns (default 20).
    #[arg(long)]
    volatility_window: Option<u32>,
}

impl ParamArgs {
    fn to_params(&self) -> SignalParameters {
        SignalParameters {
            short_window: self.short_window,
            long_window: self.long_window,
            rsi_period: self.rsi_period,
            rsi_overbought: self.rsi_overbought,
            rsi_oversold: self.rsi_oversold,
            volume_window: self.volume_window,
            volatility_window: self.volatility_window,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Signal {
            symbol,
            instrument,
            timeframe,
            csv_dir,
            output,
            params,
        } => {
            let params = effective_params(&config, &params)?;
            let symbol = config.resolve_symbol(instrument, symbol.as_deref());
            let provider = build_provider(&config, csv_dir.as_deref())?;
            run_signal(
                provider.as_ref(),
                &symbol,
                instrument,
                timeframe,
                &params,
                output.as_deref(),
            )
        }
        Commands::Scan {
            symbols,
            timeframe,
            csv_dir,
            params,
        } => {
            let params = effective_params(&config, &params)?;
            let symbols = if symbols.is_empty() {
                config.symbols.default_assets.clone()
            } else {
                symbols
            };
            if symbols.is_empty() {
                bail!("no symbols given and no default assets configured");
            }
            let provider = build_provider(&config, csv_dir.as_deref())?;
            run_scan(provider.as_ref(), &symbols, timeframe, &params)
        }
        Commands::Params { params } => {
            let params = effective_params(&config, &params)?;
            println!("{}", serde_json::to_string_pretty(&params.with_defaults())?);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "robx=info,robx_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Config file values, overlaid with command-line flags, validated.
fn effective_params(config: &AppConfig, args: &ParamArgs) -> Result<SignalParameters> {
    let params = config.signal.merge(args.to_params());
    params.validate()?;
    Ok(params)
}

fn build_provider(config: &AppConfig, csv_dir: Option<&Path>) -> Result<Box<dyn DataProvider>> {
    match csv_dir {
        Some(dir) => Ok(Box::new(CsvProvider::new(dir))),
        None => {
            let provider = YahooProvider::with_timeout(config.http.timeout())?
                .with_retries(config.http.max_retries, Duration::from_millis(500));
            Ok(Box::new(provider))
        }
    }
}

fn run_signal(
    provider: &dyn DataProvider,
    symbol: &str,
    instrument: InstrumentType,
    timeframe: Timeframe,
    params: &SignalParameters,
    output: Option<&Path>,
) -> Result<()> {
    info!(symbol, %timeframe, provider = provider.name(), "fetching series");
    let series = provider
        .fetch(symbol, timeframe)
        .with_context(|| format!("fetch {symbol} ({timeframe})"))?;

    let result = SignalEngine::new().evaluate(&series, params);
    info!(
        symbol = %series.symbol,
        recommendation = %result.recommendation,
        confidence = result.confidence,
        "signal ready"
    );

    let report = SignalReport::new(series.symbol.clone(), instrument, timeframe, params, result);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");

    if let Some(path) = output {
        std::fs::write(path, &json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "report saved");
    }
    Ok(())
}

fn run_scan(
    provider: &dyn DataProvider,
    symbols: &[String],
    timeframe: Timeframe,
    params: &SignalParameters,
) -> Result<()> {
    let engine = SignalEngine::new();

    // Fetch and evaluate in parallel; order of output follows the input list
    let outcomes: Vec<(String, Result<SignalReport>)> = symbols
        .par_iter()
        .map(|symbol| {
            let outcome = provider
                .fetch(symbol, timeframe)
                .map(|series| {
                    let result = engine.evaluate(&series, params);
                    SignalReport::new(
                        series.symbol.clone(),
                        InstrumentType::Equity,
                        timeframe,
                        params,
                        result,
                    )
                })
                .with_context(|| format!("fetch {symbol} ({timeframe})"));
            (symbol.clone(), outcome)
        })
        .collect();

    println!("{}", table_header());
    let mut failed = 0;
    for (symbol, outcome) in &outcomes {
        match outcome {
            Ok(report) => println!("{}", report.table_row()),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "scan failed");
                println!("{symbol:<12} FAIL  {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} symbols failed", outcomes.len());
    }
    Ok(())
}
