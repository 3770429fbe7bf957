//! Backtesting engine.

use daytrade_core::error::{DaytradeError, SeriesError, SimulationError};
use daytrade_core::traits::Strategy;
use daytrade_core::types::BarSeries;
use daytrade_core::DaytradeResult;
use daytrade_risk::CommissionSchedule;
use daytrade_strategies::detect_signals_with;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::report::BacktestReport;
use crate::simulator::TradeSimulator;
use crate::statistics::BacktestStats;

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Initial cash
    pub starting_balance: Decimal,
    /// Fees charged on every trade
    pub commission: CommissionSchedule,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            starting_balance: dec!(10000),
            commission: CommissionSchedule::default(),
        }
    }
}

impl BacktestConfig {
    pub fn validate(&self) -> DaytradeResult<()> {
        if self.starting_balance < Decimal::ZERO {
            return Err(SimulationError::NegativeStartingBalance(self.starting_balance).into());
        }
        self.commission.validate()
    }
}

/// Runs detection and simulation over one series.
pub struct BacktestEngine {
    config: BacktestConfig,
    simulator: TradeSimulator,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Self {
        let simulator = TradeSimulator::new(config.commission.clone());
        Self { config, simulator }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Label `series` with `strategy`, simulate the labels and report.
    pub fn run(
        &self,
        strategy: &mut dyn Strategy,
        series: &BarSeries,
    ) -> Result<BacktestReport, DaytradeError> {
        let labeled = detect_signals_with(strategy, series.bars())?;
        let ledger = self
            .simulator
            .simulate(&labeled, self.config.starting_balance)?;
        let stats = BacktestStats::compute(&ledger, &labeled)?;

        let last = series.last().ok_or(SeriesError::Empty)?;
        let final_close = Decimal::try_from(last.close).map_err(|_| {
            SimulationError::InvalidPrice {
                index: series.len() - 1,
                price: last.close,
            }
        })?;

        info!(
            symbol = %series.symbol,
            strategy = strategy.name(),
            bars = stats.bars_processed,
            trades = stats.total_trades,
            final_value = %stats.final_value,
            return_pct = %stats.total_return_pct.round_dp(2),
            "backtest complete"
        );

        Ok(BacktestReport {
            symbol: series.symbol.clone(),
            timeframe: series.timeframe,
            config: self.config.clone(),
            stats,
            final_close,
            ledger,
        })
    }
}

impl Default for BacktestEngine {
    fn default() -> Self {
        Self::new(BacktestConfig::default())
    }
}
