//! Signal labels and the flat/holding state machine they drive.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bar;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

/// Label assigned to every bar by the signal detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SignalLabel {
    /// Bullish crossover while flat: open a position
    Buy,
    /// Bullish crossover while already holding
    PotentialBuy,
    /// Bearish crossover while holding: close the position
    Sell,
    /// Bearish crossover while flat
    PotentialSell,
    /// No crossover
    Hold,
    /// Indicators not yet available
    #[default]
    Undefined,
}

impl SignalLabel {
    /// The side this label acts on, if the simulator should trade it.
    pub fn action(&self) -> Option<Side> {
        match self {
            SignalLabel::Buy => Some(Side::Buy),
            SignalLabel::Sell => Some(Side::Sell),
            _ => None,
        }
    }

    /// The side a label leans toward, including informational crossovers.
    pub fn bias(&self) -> Option<Side> {
        match self {
            SignalLabel::Buy | SignalLabel::PotentialBuy => Some(Side::Buy),
            SignalLabel::Sell | SignalLabel::PotentialSell => Some(Side::Sell),
            SignalLabel::Hold | SignalLabel::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, SignalLabel::Undefined)
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalLabel::Buy => "Buy",
            SignalLabel::PotentialBuy => "PotentialBuy",
            SignalLabel::Sell => "Sell",
            SignalLabel::PotentialSell => "PotentialSell",
            SignalLabel::Hold => "Hold",
            SignalLabel::Undefined => "Undefined",
        };
        write!(f, "{}", s)
    }
}

/// Whether the single position is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PositionState {
    /// No shares held; waiting to buy
    #[default]
    Flat,
    /// Shares held; waiting to sell
    Holding,
}

impl PositionState {
    /// Label a crossover and move to the next state.
    ///
    /// A crossover in the direction the state is waiting for becomes an
    /// actionable label and flips the state; any other crossover is only
    /// informational.
    pub fn on_crossover(self, side: Side) -> (SignalLabel, PositionState) {
        match (self, side) {
            (PositionState::Flat, Side::Buy) => (SignalLabel::Buy, PositionState::Holding),
            (PositionState::Holding, Side::Buy) => (SignalLabel::PotentialBuy, self),
            (PositionState::Holding, Side::Sell) => (SignalLabel::Sell, PositionState::Flat),
            (PositionState::Flat, Side::Sell) => (SignalLabel::PotentialSell, self),
        }
    }
}

/// A bar paired with the label the detector gave it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledBar {
    pub bar: Bar,
    pub signal: SignalLabel,
}

impl LabeledBar {
    pub fn new(bar: Bar, signal: SignalLabel) -> Self {
        Self { bar, signal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_alternate() {
        let (label, state) = PositionState::Flat.on_crossover(Side::Buy);
        assert_eq!(label, SignalLabel::Buy);
        assert_eq!(state, PositionState::Holding);

        let (label, state) = state.on_crossover(Side::Buy);
        assert_eq!(label, SignalLabel::PotentialBuy);
        assert_eq!(state, PositionState::Holding);

        let (label, state) = state.on_crossover(Side::Sell);
        assert_eq!(label, SignalLabel::Sell);
        assert_eq!(state, PositionState::Flat);

        let (label, state) = state.on_crossover(Side::Sell);
        assert_eq!(label, SignalLabel::PotentialSell);
        assert_eq!(state, PositionState::Flat);
    }

    #[test]
    fn test_label_action_and_bias() {
        assert_eq!(SignalLabel::Buy.action(), Some(Side::Buy));
        assert_eq!(SignalLabel::PotentialBuy.action(), None);
        assert_eq!(SignalLabel::PotentialBuy.bias(), Some(Side::Buy));
        assert_eq!(SignalLabel::PotentialSell.bias(), Some(Side::Sell));
        assert_eq!(SignalLabel::Hold.bias(), None);
        assert!(!SignalLabel::Undefined.is_defined());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(SignalLabel::PotentialSell.to_string(), "PotentialSell");
        assert_eq!(Side::Sell.to_string(), "Sell");
    }
}
