//! Single-position trade simulator.

use daytrade_core::error::SimulationError;
use daytrade_core::types::{LabeledBar, Ledger, LedgerEntry, Side, TradeRecord};
use daytrade_risk::{CommissionSchedule, PositionSizer};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Simulate with the default commission schedule.
pub fn simulate(labeled: &[LabeledBar], starting_balance: Decimal) -> Result<Ledger, SimulationError> {
    TradeSimulator::default().simulate(labeled, starting_balance)
}

/// Walks labeled bars forward, buying at the bar low on `Buy` and selling
/// the whole position at the bar high on `Sell`.
#[derive(Debug, Clone, Default)]
pub struct TradeSimulator {
    sizer: PositionSizer,
}

struct Fill {
    side: Side,
    price: Decimal,
    shares: u64,
    commission: Decimal,
}

impl TradeSimulator {
    /// Create a simulator charging `schedule` on every trade.
    pub fn new(schedule: CommissionSchedule) -> Self {
        Self {
            sizer: PositionSizer::new(schedule),
        }
    }

    pub fn schedule(&self) -> &CommissionSchedule {
        self.sizer.schedule()
    }

    /// Produce one ledger entry per bar.
    ///
    /// Balance and position only change on an executed trade. A `Buy` while
    /// holding, a `Sell` while flat, and a `Buy` that cannot afford a single
    /// share are skipped without charging commission.
    pub fn simulate(
        &self,
        labeled: &[LabeledBar],
        starting_balance: Decimal,
    ) -> Result<Ledger, SimulationError> {
        if starting_balance < Decimal::ZERO {
            return Err(SimulationError::NegativeStartingBalance(starting_balance));
        }

        let mut ledger = Ledger::new(starting_balance);
        let mut balance = starting_balance;
        let mut position: u64 = 0;

        for (index, item) in labeled.iter().enumerate() {
            let bar = &item.bar;

            let fill = match item.signal.action() {
                Some(Side::Buy) if position == 0 => {
                    let price = to_price(index, bar.low)?;
                    let shares = self.sizer.max_affordable_shares(price, balance);
                    if shares == 0 {
                        debug!(index, %price, %balance, "buy skipped: cannot afford one share");
                        None
                    } else {
                        Some(Fill {
                            side: Side::Buy,
                            price,
                            shares,
                            commission: self.schedule().commission(price, shares, Side::Buy),
                        })
                    }
                }
                Some(Side::Sell) if position > 0 => {
                    let price = to_price(index, bar.high)?;
                    Some(Fill {
                        side: Side::Sell,
                        price,
                        shares: position,
                        commission: self.schedule().commission(price, position, Side::Sell),
                    })
                }
                Some(side) => {
                    warn!(index, %side, position, "signal does not match position, skipped");
                    None
                }
                None => None,
            };

            let mut commission = Decimal::ZERO;
            if let Some(fill) = fill {
                let notional = fill.price * Decimal::from(fill.shares);
                match fill.side {
                    Side::Buy => {
                        balance = balance - notional - fill.commission;
                        position = fill.shares;
                    }
                    Side::Sell => {
                        balance = balance + notional - fill.commission;
                        position = 0;
                    }
                }
                if balance < Decimal::ZERO {
                    return Err(SimulationError::NegativeBalance { index, balance });
                }
                commission = fill.commission;

                let close = to_price(index, bar.close)?;
                let trade = TradeRecord {
                    index,
                    timestamp: bar.datetime(),
                    side: fill.side,
                    price: fill.price,
                    shares: fill.shares,
                    commission,
                    balance,
                    total_value: balance + close * Decimal::from(position),
                };
                info!(
                    index,
                    side = %trade.side,
                    price = %trade.price,
                    shares = trade.shares,
                    commission = %trade.commission,
                    balance = %trade.balance,
                    "trade executed"
                );
                ledger.record_trade(trade);
            }

            ledger.push(LedgerEntry {
                timestamp: bar.timestamp,
                signal: item.signal,
                balance,
                position,
                commission,
            });
        }

        Ok(ledger)
    }
}

fn to_price(index: usize, price: f64) -> Result<Decimal, SimulationError> {
    Decimal::try_from(price).map_err(|_| SimulationError::InvalidPrice { index, price })
}
