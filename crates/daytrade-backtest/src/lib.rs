//! Trade simulation and backtest reporting.

mod engine;
mod report;
mod simulator;
mod statistics;

pub use engine::{BacktestConfig, BacktestEngine};
pub use report::{format_money, BacktestReport};
pub use simulator::{simulate, TradeSimulator};
pub use statistics::{BacktestStats, RoundTrip};
