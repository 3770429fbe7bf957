//! Strategy trait definitions.

use crate::error::{SignalError, StrategyError};
use crate::types::{Bar, PositionState, SignalLabel};
use serde::{Deserialize, Serialize};

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// State of a strategy for monitoring and serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyState {
    /// Strategy name
    pub name: String,
    /// Whether indicators have become available
    pub is_ready: bool,
    /// Number of bars processed
    pub bars_processed: usize,
    /// Number of `Buy`/`Sell` labels emitted
    pub actionable_signals: usize,
    /// Number of `PotentialBuy`/`PotentialSell` labels emitted
    pub potential_signals: usize,
    /// Position the strategy believes it holds
    pub position: PositionState,
    /// Custom strategy-specific state
    pub custom: serde_json::Value,
}

impl Default for StrategyState {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_ready: false,
            bars_processed: 0,
            actionable_signals: 0,
            potential_signals: 0,
            position: PositionState::Flat,
            custom: serde_json::Value::Null,
        }
    }
}

/// Labels bars one at a time, forward in time.
///
/// Implementations may only look at the bar they are given and state kept
/// from earlier bars.
pub trait Strategy: Send + Sync {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Label the next bar of the series.
    ///
    /// `index` is the bar's position in the series and is used for error
    /// reporting only.
    fn on_bar(&mut self, index: usize, bar: &Bar) -> Result<SignalLabel, SignalError>;

    /// Reset the strategy state so a new series can be scanned.
    fn reset(&mut self);

    /// Get the current strategy state for monitoring.
    fn state(&self) -> StrategyState;

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysHold {
        bars_seen: usize,
    }

    impl Strategy for AlwaysHold {
        fn name(&self) -> &str {
            "always_hold"
        }

        fn on_bar(&mut self, _index: usize, _bar: &Bar) -> Result<SignalLabel, SignalError> {
            self.bars_seen += 1;
            Ok(SignalLabel::Hold)
        }

        fn reset(&mut self) {
            self.bars_seen = 0;
        }

        fn state(&self) -> StrategyState {
            StrategyState {
                name: self.name().to_string(),
                bars_processed: self.bars_seen,
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_strategy_state_tracks_bars() {
        let mut strategy = AlwaysHold { bars_seen: 0 };
        let bar = Bar::default();

        assert_eq!(strategy.on_bar(0, &bar).unwrap(), SignalLabel::Hold);
        assert_eq!(strategy.on_bar(1, &bar).unwrap(), SignalLabel::Hold);
        assert_eq!(strategy.state().bars_processed, 2);
        assert_eq!(strategy.state().position, PositionState::Flat);

        strategy.reset();
        assert_eq!(strategy.state().bars_processed, 0);
        assert_eq!(strategy.description(), "");
    }
}
