//! Crossover alerts for display.

use chrono::{DateTime, Utc};
use daytrade_core::types::{LabeledBar, Side, SignalLabel};
use serde::{Deserialize, Serialize};

/// A crossover bar, priced at the side of the range it would trade at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub side: Side,
    pub label: SignalLabel,
    /// Bar low for buy-side alerts, bar high for sell-side alerts
    pub price: f64,
    pub rsi: Option<f64>,
}

/// Every bullish or bearish crossover in the series, actionable or not.
pub fn alerts(labeled: &[LabeledBar]) -> Vec<Alert> {
    labeled
        .iter()
        .filter_map(|l| {
            let side = l.signal.bias()?;
            Some(Alert {
                timestamp: l.bar.datetime(),
                side,
                label: l.signal,
                price: match side {
                    Side::Buy => l.bar.low,
                    Side::Sell => l.bar.high,
                },
                rsi: l.bar.indicators.rsi,
            })
        })
        .collect()
}

/// Time and price of a crossover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Most recent informational crossovers in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub buy: Option<TimingPoint>,
    pub sell: Option<TimingPoint>,
}

/// Find the latest `PotentialBuy` (at its low) and `PotentialSell` (at its high).
pub fn latest_timing(labeled: &[LabeledBar]) -> Timing {
    let mut timing = Timing::default();

    for l in labeled.iter().rev() {
        match l.signal {
            SignalLabel::PotentialBuy if timing.buy.is_none() => {
                timing.buy = Some(TimingPoint {
                    timestamp: l.bar.datetime(),
                    price: l.bar.low,
                });
            }
            SignalLabel::PotentialSell if timing.sell.is_none() => {
                timing.sell = Some(TimingPoint {
                    timestamp: l.bar.datetime(),
                    price: l.bar.high,
                });
            }
            _ => {}
        }
        if timing.buy.is_some() && timing.sell.is_some() {
            break;
        }
    }

    timing
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrade_core::types::Bar;

    fn labeled(i: i64, signal: SignalLabel) -> LabeledBar {
        let bar = Bar::new(i * 60_000, 10.0, 10.0 + i as f64, 9.0 - i as f64, 10.0, 1.0).with_rsi(42.0);
        LabeledBar::new(bar, signal)
    }

    #[test]
    fn test_alerts_price_by_side() {
        let series = vec![
            labeled(0, SignalLabel::Undefined),
            labeled(1, SignalLabel::Buy),
            labeled(2, SignalLabel::Hold),
            labeled(3, SignalLabel::PotentialSell),
        ];

        let alerts = alerts(&series);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].side, Side::Buy);
        assert_eq!(alerts[0].price, 8.0);
        assert_eq!(alerts[1].side, Side::Sell);
        assert_eq!(alerts[1].price, 13.0);
        assert_eq!(alerts[1].rsi, Some(42.0));
    }

    #[test]
    fn test_latest_timing_picks_most_recent() {
        let series = vec![
            labeled(0, SignalLabel::PotentialBuy),
            labeled(1, SignalLabel::PotentialSell),
            labeled(2, SignalLabel::PotentialBuy),
            labeled(3, SignalLabel::Sell),
        ];

        let timing = latest_timing(&series);
        assert_eq!(timing.buy.unwrap().price, 7.0);
        assert_eq!(timing.buy.unwrap().timestamp.timestamp_millis(), 120_000);
        assert_eq!(timing.sell.unwrap().price, 11.0);
    }

    #[test]
    fn test_latest_timing_ignores_actionable_labels() {
        let series = vec![labeled(0, SignalLabel::Buy), labeled(1, SignalLabel::Sell)];
        assert_eq!(latest_timing(&series), Timing::default());
    }
}
