//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daytrade")]
#[command(author, version, about = "MACD/RSI crossover signals and day-trade simulation")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect signals and simulate trades for one or more symbols
    Backtest(BacktestArgs),
    /// Print crossover alerts and the latest timing for a symbol
    Signals(SignalsArgs),
    /// Validate configuration
    ValidateConfig,
}

/// Where bars come from and how they are prepared.
#[derive(clap::Args)]
pub struct DataArgs {
    /// CSV file (single symbol) or directory of `<SYMBOL>_<timeframe>.csv` files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Bar interval (1m, 5m, 15m, 30m, 60m, 1d)
    #[arg(short, long)]
    pub timeframe: Option<String>,

    /// Recompute indicators even when the CSV already has them
    #[arg(long)]
    pub recompute_indicators: bool,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Symbols to trade (comma-separated, defaults to the configured tickers)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Starting balance (defaults to the configured balance)
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Print every executed trade
    #[arg(long)]
    pub trades: bool,

    /// Directory to save `<SYMBOL>_report.json` and `<SYMBOL>_ledger.csv` into
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct SignalsArgs {
    /// Symbol to scan
    #[arg(short = 'S', long)]
    pub symbol: String,

    #[command(flatten)]
    pub data: DataArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}
