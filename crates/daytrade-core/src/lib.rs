//! Core types and traits for the day-trade simulator.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, IndicatorValues, BarSeries)
//! - Signal labels and labeled bars
//! - Ledger entries and trade records
//! - Core traits for strategies and indicators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DaytradeError, DaytradeResult};
pub use types::*;
pub use traits::*;
