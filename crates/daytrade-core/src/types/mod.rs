//! Core data types for the day-trade simulator.

mod ledger;
mod ohlcv;
mod signal;
mod timeframe;

pub use ledger::{Ledger, LedgerEntry, TradeRecord};
pub use ohlcv::{Bar, BarSeries, IndicatorValues};
pub use signal::{LabeledBar, PositionState, Side, SignalLabel};
pub use timeframe::Timeframe;
