//! Core traits for the day-trade simulator.

mod indicator;
mod strategy;

pub use indicator::Indicator;
pub use strategy::{Strategy, StrategyConfig, StrategyState};
