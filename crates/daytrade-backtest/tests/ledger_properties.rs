//! Property tests for the trade simulator.
//!
//! Uses proptest to verify:
//! 1. Ledger conservation: non-trading bars carry balance and position forward
//! 2. Balance never goes negative and shares are whole
//! 3. Commission is only charged on bars where position changes

use daytrade_backtest::simulate;
use daytrade_core::types::{Bar, LabeledBar, SignalLabel};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_label() -> impl Strategy<Value = SignalLabel> {
    prop_oneof![
        3 => Just(SignalLabel::Hold),
        1 => Just(SignalLabel::Buy),
        1 => Just(SignalLabel::Sell),
        1 => Just(SignalLabel::PotentialBuy),
        1 => Just(SignalLabel::PotentialSell),
        1 => Just(SignalLabel::Undefined),
    ]
}

/// Bars priced in cents between $10 and $500 with a spread of up to $5.
fn arb_labeled_bars() -> impl Strategy<Value = Vec<LabeledBar>> {
    prop::collection::vec((1_000i64..50_000, 0i64..500, arb_label()), 1..150).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (low_cents, spread, label))| {
                let low = low_cents as f64 / 100.0;
                let high = (low_cents + spread) as f64 / 100.0;
                let close = (low + high) / 2.0;
                LabeledBar::new(
                    Bar::new(i as i64 * 60_000, close, high, low, close, 1_000.0),
                    label,
                )
            })
            .collect()
    })
}

fn arb_balance() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn non_trading_bars_carry_state_forward(bars in arb_labeled_bars(), start in arb_balance()) {
        let ledger = simulate(&bars, start).unwrap();
        prop_assert_eq!(ledger.len(), bars.len());

        let mut prev = (start, 0u64);
        for (entry, bar) in ledger.entries.iter().zip(&bars) {
            if bar.signal.action().is_none() {
                prop_assert_eq!((entry.balance, entry.position), prev);
                prop_assert!(entry.commission.is_zero());
            }
            prev = (entry.balance, entry.position);
        }
    }

    #[test]
    fn balance_stays_non_negative(bars in arb_labeled_bars(), start in arb_balance()) {
        let ledger = simulate(&bars, start).unwrap();
        for entry in &ledger.entries {
            prop_assert!(entry.balance >= Decimal::ZERO);
        }
    }

    #[test]
    fn commission_only_on_position_change(bars in arb_labeled_bars(), start in arb_balance()) {
        let ledger = simulate(&bars, start).unwrap();

        let mut prev_position = 0u64;
        for entry in &ledger.entries {
            if entry.position == prev_position {
                prop_assert!(entry.commission.is_zero());
            } else {
                prop_assert!(entry.commission >= Decimal::ONE);
            }
            prev_position = entry.position;
        }
        prop_assert_eq!(ledger.trades.len(), ledger.entries.iter().filter(|e| !e.commission.is_zero()).count());
    }
}
