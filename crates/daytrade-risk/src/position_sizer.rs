//! Whole-share position sizing.

use daytrade_core::types::Side;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::trace;

use crate::CommissionSchedule;

/// Sizes buys as the largest whole-share order the cash can pay for,
/// commission included.
#[derive(Debug, Clone, Default)]
pub struct PositionSizer {
    schedule: CommissionSchedule,
}

impl PositionSizer {
    /// Create a new position sizer.
    pub fn new(schedule: CommissionSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &CommissionSchedule {
        &self.schedule
    }

    /// Cash needed to buy `shares` at `price`, commission included.
    ///
    /// `None` if the amount does not fit in a `Decimal`.
    pub fn buy_cost(&self, price: Decimal, shares: u64) -> Option<Decimal> {
        price
            .checked_mul(Decimal::from(shares))?
            .checked_add(self.schedule.commission(price, shares, Side::Buy))
    }

    fn fits(&self, price: Decimal, shares: u64, balance: Decimal) -> bool {
        self.buy_cost(price, shares)
            .is_some_and(|cost| cost <= balance)
    }

    /// Largest `n` with `price * n + commission(n) <= balance`.
    ///
    /// Cost grows with `n`, so the affordable sizes form a prefix of
    /// `0..=floor(balance / price)`; the boundary is found by bisection.
    /// Returns 0 when not even one share fits or the price is not positive.
    pub fn max_affordable_shares(&self, price: Decimal, balance: Decimal) -> u64 {
        if price <= Decimal::ZERO || balance <= Decimal::ZERO {
            return 0;
        }

        // price * upper > balance, so `upper` never fits
        let upper = balance
            .checked_div(price)
            .and_then(|ratio| ratio.floor().to_u64())
            .map_or(u64::MAX, |n| n.saturating_add(1));

        let (mut lo, mut hi) = (0u64, upper);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.fits(price, mid, balance) {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        trace!(%price, %balance, upper, shares = lo, "sized buy");
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sizer() -> PositionSizer {
        PositionSizer::new(CommissionSchedule::default())
    }

    #[test]
    fn test_max_affordable_round_price() {
        // 9 shares cost 900 + 1.027; 10 shares cost 1000 + 1.03
        assert_eq!(sizer().max_affordable_shares(dec!(100), dec!(1000)), 9);
    }

    #[test]
    fn test_leftover_below_one_share() {
        let sizer = sizer();
        let (price, balance) = (dec!(123.45), dec!(10000));

        let shares = sizer.max_affordable_shares(price, balance);
        assert_eq!(shares, 80);

        let leftover = balance - sizer.buy_cost(price, shares).unwrap();
        assert!(leftover >= Decimal::ZERO);
        assert!(leftover < price);
    }

    #[test]
    fn test_cannot_afford_one_share() {
        assert_eq!(sizer().max_affordable_shares(dec!(100), dec!(50)), 0);
        // 100 + 1.003 > 100.5
        assert_eq!(sizer().max_affordable_shares(dec!(100), dec!(100.5)), 0);
        assert_eq!(sizer().max_affordable_shares(dec!(100), dec!(101.003)), 1);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(sizer().max_affordable_shares(dec!(0), dec!(1000)), 0);
        assert_eq!(sizer().max_affordable_shares(dec!(-5), dec!(1000)), 0);
        assert_eq!(sizer().max_affordable_shares(dec!(10), dec!(0)), 0);
    }

    #[test]
    fn test_commission_step_keeps_largest_affordable() {
        // 10 shares need 1001.03; 9 shares leave 100.001, more than one share
        let sizer = sizer();
        let shares = sizer.max_affordable_shares(dec!(100), dec!(1001.028));
        assert_eq!(shares, 9);
        assert!(!sizer.fits(dec!(100), 10, dec!(1001.028)));
    }

    #[test]
    fn test_large_balance() {
        let sizer = sizer();
        let shares = sizer.max_affordable_shares(dec!(0.5), dec!(1000000));
        assert!(sizer.fits(dec!(0.5), shares, dec!(1000000)));
        assert!(!sizer.fits(dec!(0.5), shares + 1, dec!(1000000)));
    }
}
