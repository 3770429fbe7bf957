//! Backtest report generation.

use daytrade_core::types::{Ledger, Timeframe};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{BacktestConfig, BacktestStats};

/// Complete backtest report for one instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Configuration used
    pub config: BacktestConfig,
    /// Statistics
    pub stats: BacktestStats,
    /// Close of the last bar, used to mark the open position
    pub final_close: Decimal,
    /// Per-bar ledger
    pub ledger: Ledger,
}

impl BacktestReport {
    pub fn final_balance(&self) -> Decimal {
        self.ledger.final_balance()
    }

    pub fn final_position(&self) -> u64 {
        self.ledger.final_position()
    }

    /// Cash plus the open position at the last close.
    pub fn total_asset_value(&self) -> Decimal {
        self.ledger.final_valuation(self.final_close)
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!(
            "{:^59}\n",
            format!("BACKTEST REPORT: {} ({})", self.symbol, self.timeframe)
        ));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Starting Balance:    ${}\n",
            format_money(self.stats.starting_balance)
        ));
        s.push_str(&format!(
            "  Final Balance:       ${}\n",
            format_money(self.final_balance())
        ));
        s.push_str(&format!(
            "  Final Position:      {} shares @ ${}\n",
            self.final_position(),
            format_money(self.final_close)
        ));
        s.push_str(&format!(
            "  Total Asset Value:   ${}\n",
            format_money(self.total_asset_value())
        ));
        s.push_str(&format!(
            "  Total Return:        {:.2}%\n",
            self.stats.total_return_pct
        ));
        s.push_str(&format!(
            "  Max Drawdown:        {:.2}%\n",
            self.stats.max_drawdown_pct
        ));
        s.push('\n');

        s.push_str("TRADE STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Executed Trades:     {}\n",
            self.stats.total_trades
        ));
        s.push_str(&format!(
            "  Round Trips:         {}\n",
            self.stats.round_trips.len()
        ));
        s.push_str(&format!(
            "  Winning Trades:      {}\n",
            self.stats.winning_trades
        ));
        s.push_str(&format!(
            "  Losing Trades:       {}\n",
            self.stats.losing_trades
        ));
        s.push_str(&format!(
            "  Win Rate:            {:.2}%\n",
            self.stats.win_rate_pct
        ));
        s.push_str(&format!(
            "  Avg Win:             ${}\n",
            format_money(self.stats.avg_win)
        ));
        s.push_str(&format!(
            "  Avg Loss:            ${}\n",
            format_money(self.stats.avg_loss)
        ));
        s.push_str(&format!(
            "  Profit Factor:       {:.2}\n",
            self.stats.profit_factor
        ));
        s.push_str(&format!(
            "  Total Commission:    ${}\n",
            format_money(self.stats.total_commission)
        ));
        s.push('\n');

        s.push_str("EXECUTION\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Bars Processed:      {}\n",
            self.stats.bars_processed
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// One line per executed trade.
    pub fn trade_log(&self) -> String {
        let format = self.timeframe.time_format();
        let mut s = String::new();
        for trade in &self.ledger.trades {
            s.push_str(&format!(
                "{}  {:<4}  {:>10} @{:<6}  Commission: {:>8}  Balance: {:>12}  Total: {:>12}\n",
                trade.timestamp.format(format),
                trade.side,
                format_money(trade.price),
                trade.shares,
                format_money(trade.commission),
                format_money(trade.balance),
                format_money(trade.total_value),
            ));
        }
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the ledger to CSV.
    pub fn ledger_to_csv(&self) -> String {
        let mut csv = String::from("timestamp,signal,balance,position,commission\n");
        for entry in &self.ledger.entries {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                entry.timestamp, entry.signal, entry.balance, entry.position, entry.commission
            ));
        }
        csv
    }
}

/// Render `value` rounded to cents with thousands separators.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded < Decimal::ZERO;
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}
