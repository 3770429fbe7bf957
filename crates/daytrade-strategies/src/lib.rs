//! Signal detection.
//!
//! This crate labels a bar series with trade signals:
//! - MACD/RSI crossover strategy with an explicit flat/holding state machine
//! - Whole-series detection entry points
//! - Crossover alerts and latest-timing summaries for display

mod alerts;
mod detect;
mod macd_rsi;

pub use alerts::{alerts, latest_timing, Alert, Timing, TimingPoint};
pub use detect::{detect_signals, detect_signals_with};
pub use macd_rsi::{MacdRsiConfig, MacdRsiStrategy};
