//! Backtest statistics.

use daytrade_core::error::SimulationError;
use daytrade_core::types::{LabeledBar, Ledger, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A buy followed by the sell that closed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub entry_index: usize,
    pub exit_index: usize,
    pub shares: u64,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    /// Cash gained or lost, both commissions included
    pub pnl: Decimal,
    /// `pnl` relative to the cash held before the buy
    pub return_pct: Decimal,
}

impl RoundTrip {
    pub fn is_win(&self) -> bool {
        self.pnl > Decimal::ZERO
    }
}

/// Backtest statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BacktestStats {
    /// Initial cash
    pub starting_balance: Decimal,
    /// Cash plus open position at the last close
    pub final_value: Decimal,
    /// Total return percentage
    pub total_return_pct: Decimal,
    /// Maximum drawdown of total value, percentage
    pub max_drawdown_pct: Decimal,
    /// Executed buys and sells
    pub total_trades: usize,
    /// Closed round trips
    pub round_trips: Vec<RoundTrip>,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Win rate percentage over closed round trips
    pub win_rate_pct: Decimal,
    /// Average profit per winning round trip
    pub avg_win: Decimal,
    /// Average loss per losing round trip
    pub avg_loss: Decimal,
    /// Gross profit / gross loss
    pub profit_factor: Decimal,
    pub total_commission: Decimal,
    pub bars_processed: usize,
    /// Total value after every bar
    pub equity_curve: Vec<(i64, Decimal)>,
}

impl BacktestStats {
    /// Compute statistics for a ledger produced from `labeled`.
    pub fn compute(ledger: &Ledger, labeled: &[LabeledBar]) -> Result<Self, SimulationError> {
        let mut stats = Self {
            starting_balance: ledger.starting_balance,
            final_value: ledger.starting_balance,
            total_trades: ledger.trades.len(),
            total_commission: ledger.total_commission(),
            bars_processed: ledger.len(),
            ..Default::default()
        };

        let mut peak = ledger.starting_balance;
        for (index, (entry, item)) in ledger.entries.iter().zip(labeled).enumerate() {
            let close = Decimal::try_from(item.bar.close).map_err(|_| {
                SimulationError::InvalidPrice {
                    index,
                    price: item.bar.close,
                }
            })?;
            let value = entry.balance + close * Decimal::from(entry.position);
            stats.equity_curve.push((entry.timestamp, value));

            peak = peak.max(value);
            if peak > Decimal::ZERO {
                let drawdown = (peak - value) / peak * dec!(100);
                stats.max_drawdown_pct = stats.max_drawdown_pct.max(drawdown);
            }
        }

        if let Some((_, value)) = stats.equity_curve.last() {
            stats.final_value = *value;
        }
        if stats.starting_balance > Decimal::ZERO {
            stats.total_return_pct = (stats.final_value - stats.starting_balance)
                / stats.starting_balance
                * dec!(100);
        }

        stats.round_trips = round_trips(ledger);
        stats.summarize_round_trips();
        Ok(stats)
    }

    fn summarize_round_trips(&mut self) {
        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;

        for trip in &self.round_trips {
            if trip.pnl > Decimal::ZERO {
                self.winning_trades += 1;
                gross_profit += trip.pnl;
            } else if trip.pnl < Decimal::ZERO {
                self.losing_trades += 1;
                gross_loss += trip.pnl.abs();
            }
        }

        if !self.round_trips.is_empty() {
            self.win_rate_pct = Decimal::from(self.winning_trades * 100)
                / Decimal::from(self.round_trips.len());
        }
        if self.winning_trades > 0 {
            self.avg_win = gross_profit / Decimal::from(self.winning_trades);
        }
        if self.losing_trades > 0 {
            self.avg_loss = gross_loss / Decimal::from(self.losing_trades);
        }
        if gross_loss > Decimal::ZERO {
            self.profit_factor = gross_profit / gross_loss;
        }
    }
}

/// Pair every buy with the sell that follows it. An open position at the
/// end of the ledger is not a round trip.
fn round_trips(ledger: &Ledger) -> Vec<RoundTrip> {
    let mut trips = Vec::new();
    let mut open = None;

    for trade in &ledger.trades {
        match trade.side {
            Side::Buy => {
                let before =
                    trade.balance + trade.price * Decimal::from(trade.shares) + trade.commission;
                open = Some((trade, before));
            }
            Side::Sell => {
                let Some((entry, before)) = open.take() else {
                    continue;
                };
                let pnl = trade.balance - before;
                let return_pct = if before > Decimal::ZERO {
                    pnl / before * dec!(100)
                } else {
                    Decimal::ZERO
                };
                trips.push(RoundTrip {
                    entry_index: entry.index,
                    exit_index: trade.index,
                    shares: trade.shares,
                    entry_price: entry.price,
                    exit_price: trade.price,
                    pnl,
                    return_pct,
                });
            }
        }
    }

    trips
}
