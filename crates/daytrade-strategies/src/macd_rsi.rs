//! MACD crossover strategy with an RSI filter.
//!
//! A bullish DIF/DEM crossover below the zero line opens a position; a
//! bearish crossover above the zero line with RSI at or above the sell
//! threshold closes it. Crossovers that do not match the current position
//! state are reported as `PotentialBuy` / `PotentialSell`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use daytrade_core::{
    error::{SignalError, StrategyError},
    traits::{Strategy, StrategyConfig, StrategyState},
    types::{Bar, PositionState, Side, SignalLabel},
};

/// Configuration for the MACD/RSI strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdRsiConfig {
    /// A bullish crossover only counts when RSI is at or below this
    pub buy_rsi_max: f64,
    /// A bearish crossover only counts when RSI is at or above this
    pub sell_rsi_min: f64,
}

impl Default for MacdRsiConfig {
    fn default() -> Self {
        Self {
            buy_rsi_max: 100.0,
            sell_rsi_min: 50.0,
        }
    }
}

impl StrategyConfig for MacdRsiConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        for (name, value) in [
            ("buy_rsi_max", self.buy_rsi_max),
            ("sell_rsi_min", self.sell_rsi_min),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(StrategyError::InvalidConfig(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// MACD crossover strategy with an RSI filter.
pub struct MacdRsiStrategy {
    config: MacdRsiConfig,
    /// DIF/DEM of the previous bar; `Some` once indicators are available
    prev_macd: Option<(f64, f64)>,
    position: PositionState,
    bars_processed: usize,
    actionable_signals: usize,
    potential_signals: usize,
}

impl MacdRsiStrategy {
    /// Create a new MACD/RSI strategy.
    pub fn new(config: MacdRsiConfig) -> Self {
        Self {
            config,
            prev_macd: None,
            position: PositionState::Flat,
            bars_processed: 0,
            actionable_signals: 0,
            potential_signals: 0,
        }
    }

    pub fn config(&self) -> &MacdRsiConfig {
        &self.config
    }

    /// Whether the bar completes a crossover, and in which direction.
    ///
    /// A missing RSI never satisfies either filter.
    fn crossover(&self, prev: (f64, f64), current: (f64, f64), rsi: Option<f64>) -> Option<Side> {
        let (prev_dif, prev_dem) = prev;
        let (dif, dem) = current;
        let rsi = rsi?;

        let bullish = dif > dem
            && prev_dif < prev_dem
            && dif < 0.0
            && dem < 0.0
            && rsi <= self.config.buy_rsi_max;
        let bearish = dif < dem
            && prev_dif > prev_dem
            && dif > 0.0
            && dem > 0.0
            && rsi >= self.config.sell_rsi_min;

        if bullish {
            Some(Side::Buy)
        } else if bearish {
            Some(Side::Sell)
        } else {
            None
        }
    }
}

impl Default for MacdRsiStrategy {
    fn default() -> Self {
        Self::new(MacdRsiConfig::default())
    }
}

impl Strategy for MacdRsiStrategy {
    fn name(&self) -> &str {
        "MACD/RSI Crossover"
    }

    fn description(&self) -> &str {
        "Buys bullish DIF/DEM crossovers below zero, sells bearish crossovers above zero with RSI confirmation"
    }

    fn on_bar(&mut self, index: usize, bar: &Bar) -> Result<SignalLabel, SignalError> {
        self.bars_processed += 1;
        let current = bar.indicators.macd_pair();

        let label = match (self.prev_macd, current) {
            (None, _) => SignalLabel::Undefined,
            (Some(_), None) => return Err(SignalError::MissingIndicator { index }),
            (Some(prev), Some(cur)) => match self.crossover(prev, cur, bar.indicators.rsi) {
                Some(side) => {
                    let (label, next) = self.position.on_crossover(side);
                    self.position = next;
                    label
                }
                None => SignalLabel::Hold,
            },
        };

        if current.is_some() {
            self.prev_macd = current;
        }

        match label {
            SignalLabel::Buy | SignalLabel::Sell => {
                self.actionable_signals += 1;
                debug!(index, timestamp = bar.timestamp, %label, "crossover signal");
            }
            SignalLabel::PotentialBuy | SignalLabel::PotentialSell => {
                self.potential_signals += 1;
                trace!(index, timestamp = bar.timestamp, %label, "crossover ignored by position state");
            }
            SignalLabel::Hold | SignalLabel::Undefined => {}
        }

        Ok(label)
    }

    fn reset(&mut self) {
        self.prev_macd = None;
        self.position = PositionState::Flat;
        self.bars_processed = 0;
        self.actionable_signals = 0;
        self.potential_signals = 0;
    }

    fn state(&self) -> StrategyState {
        StrategyState {
            name: self.name().to_string(),
            is_ready: self.prev_macd.is_some(),
            bars_processed: self.bars_processed,
            actionable_signals: self.actionable_signals,
            potential_signals: self.potential_signals,
            position: self.position,
            custom: serde_json::json!({
                "buy_rsi_max": self.config.buy_rsi_max,
                "sell_rsi_min": self.config.sell_rsi_min,
            }),
        }
    }
}
