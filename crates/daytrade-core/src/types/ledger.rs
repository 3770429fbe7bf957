//! Per-bar ledger produced by the trade simulator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Side, SignalLabel};

/// Account state after one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unix timestamp in milliseconds of the bar
    pub timestamp: i64,
    /// Label the bar carried
    pub signal: SignalLabel,
    /// Cash after this bar's action
    pub balance: Decimal,
    /// Shares held after this bar's action
    pub position: u64,
    /// Commission paid on this bar (zero when nothing executed)
    pub commission: Decimal,
}

/// An executed buy or sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Index of the bar the trade executed on
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub side: Side,
    /// Execution price (bar low for buys, bar high for sells)
    pub price: Decimal,
    pub shares: u64,
    pub commission: Decimal,
    /// Cash after the trade
    pub balance: Decimal,
    /// Cash plus holdings marked at the bar close
    pub total_value: Decimal,
}

/// Append-only, index-aligned record of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub starting_balance: Decimal,
    pub entries: Vec<LedgerEntry>,
    pub trades: Vec<TradeRecord>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new(starting_balance: Decimal) -> Self {
        Self {
            starting_balance,
            entries: Vec::new(),
            trades: Vec::new(),
        }
    }

    /// Append the next bar's entry.
    pub fn push(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Record an executed trade.
    pub fn record_trade(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cash after the last bar, or the starting balance if nothing ran.
    pub fn final_balance(&self) -> Decimal {
        self.entries
            .last()
            .map(|e| e.balance)
            .unwrap_or(self.starting_balance)
    }

    /// Shares held after the last bar.
    pub fn final_position(&self) -> u64 {
        self.entries.last().map(|e| e.position).unwrap_or(0)
    }

    /// Cash plus the open position marked at `close`.
    pub fn final_valuation(&self, close: Decimal) -> Decimal {
        let position = self.final_position();
        if position > 0 {
            self.final_balance() + close * Decimal::from(position)
        } else {
            self.final_balance()
        }
    }

    /// Sum of all commissions paid.
    pub fn total_commission(&self) -> Decimal {
        self.entries.iter().map(|e| e.commission).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(balance: Decimal, position: u64) -> LedgerEntry {
        LedgerEntry {
            timestamp: 0,
            signal: SignalLabel::Hold,
            balance,
            position,
            commission: Decimal::ZERO,
        }
    }

    #[test]
    fn test_empty_ledger_reports_starting_balance() {
        let ledger = Ledger::new(dec!(10000));
        assert_eq!(ledger.final_balance(), dec!(10000));
        assert_eq!(ledger.final_position(), 0);
        assert_eq!(ledger.final_valuation(dec!(50)), dec!(10000));
    }

    #[test]
    fn test_final_valuation_marks_open_position() {
        let mut ledger = Ledger::new(dec!(1000));
        ledger.push(entry(dec!(98.973), 9));
        assert_eq!(ledger.final_valuation(dec!(105)), dec!(1043.973));
    }

    #[test]
    fn test_total_commission() {
        let mut ledger = Ledger::new(dec!(1000));
        let mut a = entry(dec!(500), 5);
        a.commission = dec!(1.015);
        let mut b = entry(dec!(1000), 0);
        b.commission = dec!(1.04);
        ledger.push(a);
        ledger.push(b);
        assert_eq!(ledger.total_commission(), dec!(2.055));
    }
}
