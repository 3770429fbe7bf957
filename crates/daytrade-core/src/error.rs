//! Error types for the day-trade simulator.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum DaytradeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),

    #[error("Signal detection failed: {0}")]
    Signal(#[from] SignalError),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A bar series that cannot be processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("series is empty")]
    Empty,

    #[error("bar {index} is not after the previous bar (timestamp {timestamp})")]
    NotTimeOrdered { index: usize, timestamp: i64 },

    #[error("bar {index} has high {high} below low {low}")]
    HighBelowLow { index: usize, high: f64, low: f64 },

    #[error("bar {index} has a negative or non-finite {field}: {value}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// Signal detection errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("{0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("bar {index} lost its DIF/DEM after indicators became available")]
    MissingIndicator { index: usize },
}

/// Trade simulation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("bar {index} has an execution price that cannot be represented: {price}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("balance went negative at bar {index}: {balance}")]
    NegativeBalance { index: usize, balance: Decimal },

    #[error("starting balance must not be negative: {0}")]
    NegativeStartingBalance(Decimal),
}

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("No data available for {0}")]
    NoDataAvailable(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("{0}")]
    InvalidSeries(#[from] SeriesError),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for day-trade operations.
pub type DaytradeResult<T> = Result<T, DaytradeError>;
