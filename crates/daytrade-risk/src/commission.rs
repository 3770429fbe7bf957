//! Per-trade commission schedule.

use daytrade_core::error::DaytradeError;
use daytrade_core::types::Side;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fee schedule charged on every executed trade.
///
/// Both sides pay a per-share broker fee (with a minimum) plus a per-share
/// clearing fee. Sells additionally pay a regulatory fee on notional value
/// and a per-share trading activity fee, each with a floor, the latter
/// with a cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionSchedule {
    /// Minimum broker fee per trade
    pub min_fee: Decimal,
    /// Broker fee per share
    pub per_share: Decimal,
    /// Clearing fee per share
    pub clearing_per_share: Decimal,
    /// Sell-side fee as a fraction of notional
    pub sec_fee_rate: Decimal,
    /// Floor of the notional fee
    pub sec_fee_min: Decimal,
    /// Sell-side trading activity fee per share
    pub taf_per_share: Decimal,
    /// Floor of the trading activity fee
    pub taf_min: Decimal,
    /// Cap of the trading activity fee
    pub taf_max: Decimal,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self {
            min_fee: dec!(1),
            per_share: dec!(0.005),
            clearing_per_share: dec!(0.003),
            sec_fee_rate: dec!(0.000008),
            sec_fee_min: dec!(0.01),
            taf_per_share: dec!(0.000145),
            taf_min: dec!(0.01),
            taf_max: dec!(7.27),
        }
    }
}

impl CommissionSchedule {
    /// Commission for trading `shares` at `price`.
    ///
    /// A zero-share trade still reports the minimum fee; callers decide
    /// whether such a trade happens at all.
    pub fn commission(&self, price: Decimal, shares: u64, side: Side) -> Decimal {
        let shares = Decimal::from(shares);
        let mut fee = self.min_fee.max(self.per_share.saturating_mul(shares))
            + self.clearing_per_share.saturating_mul(shares);

        if side == Side::Sell {
            let notional = price.saturating_mul(shares);
            let sec_fee = self.sec_fee_min.max(self.sec_fee_rate.saturating_mul(notional));
            let taf = self
                .taf_max
                .min(self.taf_min.max(self.taf_per_share.saturating_mul(shares)));
            fee = fee.saturating_add(sec_fee).saturating_add(taf);
        }

        fee
    }

    /// Reject schedules that would charge negative fees or shrink with size.
    pub fn validate(&self) -> Result<(), DaytradeError> {
        let rates = [
            ("min_fee", self.min_fee),
            ("per_share", self.per_share),
            ("clearing_per_share", self.clearing_per_share),
            ("sec_fee_rate", self.sec_fee_rate),
            ("sec_fee_min", self.sec_fee_min),
            ("taf_per_share", self.taf_per_share),
            ("taf_min", self.taf_min),
            ("taf_max", self.taf_max),
        ];
        if let Some((name, value)) = rates.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(DaytradeError::Config(format!(
                "commission {} must not be negative, got {}",
                name, value
            )));
        }
        if self.taf_min > self.taf_max {
            return Err(DaytradeError::Config(format!(
                "commission taf_min ({}) exceeds taf_max ({})",
                self.taf_min, self.taf_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_commission() {
        let schedule = CommissionSchedule::default();
        // max(1, 0.05) + 0.03
        assert_eq!(schedule.commission(dec!(100), 10, Side::Buy), dec!(1.03));
    }

    #[test]
    fn test_sell_commission_floors() {
        let schedule = CommissionSchedule::default();
        // 1.03 + max(0.01, 0.004) + min(7.27, max(0.01, 0.00145))
        assert_eq!(schedule.commission(dec!(50), 10, Side::Sell), dec!(1.05));
    }

    #[test]
    fn test_per_share_fee_above_minimum() {
        let schedule = CommissionSchedule::default();
        // 0.005 * 1000 + 0.003 * 1000
        assert_eq!(schedule.commission(dec!(20), 1000, Side::Buy), dec!(8));
    }

    #[test]
    fn test_sell_fees_scale_and_cap() {
        let schedule = CommissionSchedule::default();
        // base: 500 + 300; sec: 0.000008 * 100 * 100000 = 80; taf: min(7.27, 14.5)
        assert_eq!(
            schedule.commission(dec!(100), 100_000, Side::Sell),
            dec!(887.27)
        );
    }

    #[test]
    fn test_zero_shares_reports_minimum() {
        let schedule = CommissionSchedule::default();
        assert_eq!(schedule.commission(dec!(100), 0, Side::Buy), dec!(1));
    }

    #[test]
    fn test_validate() {
        assert!(CommissionSchedule::default().validate().is_ok());

        let negative = CommissionSchedule {
            per_share: dec!(-0.005),
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let inverted = CommissionSchedule {
            taf_min: dec!(10),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }
}
