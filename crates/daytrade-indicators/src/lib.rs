//! Technical indicators for the crossover detector.
//!
//! Every indicator returns a column aligned to its input, with `None`
//! while the smoothing window fills:
//! - Moving averages (recursive EMA, bias-adjusted EWM)
//! - Momentum indicators (MACD DIF/DEM/histogram, RSI, KDJ)
//!
//! [`attach_indicators`] fills a [`BarSeries`](daytrade_core::types::BarSeries)
//! with all of them in one call.

mod attach;
pub mod momentum;
pub mod moving_average;

pub use attach::{attach_indicators, IndicatorSettings};
pub use momentum::{Kdj, KdjOutput, Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Ewm};
