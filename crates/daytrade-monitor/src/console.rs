//! Plain-text rendering of alerts and crossover timing.

use chrono::{DateTime, Utc};
use daytrade_core::types::Timeframe;
use daytrade_strategies::{Alert, Timing, TimingPoint};

/// One line per alert: time, side, price and RSI.
pub fn render_alerts(alerts: &[Alert], timeframe: Timeframe) -> String {
    let format = timeframe.time_format();
    let mut s = String::new();
    for alert in alerts {
        let rsi = alert
            .rsi
            .map(|r| format!("{:5.2}", r))
            .unwrap_or_else(|| "  n/a".to_string());
        s.push_str(&format!(
            "{}\t{:<6}\t{:.2}\tRSI: {}\t{}\n",
            alert.timestamp.format(format),
            alert.side.to_string(),
            alert.price,
            rsi,
            alert.label,
        ));
    }
    s
}

fn point(p: Option<&TimingPoint>, format: &str) -> String {
    match p {
        Some(p) => format!("{:.2} at {}", p.price, fmt_time(p.timestamp, format)),
        None => "none".to_string(),
    }
}

fn fmt_time(ts: DateTime<Utc>, format: &str) -> String {
    ts.format(format).to_string()
}

/// Latest informational crossovers for `symbol`.
pub fn render_timing(symbol: &str, timing: &Timing, timeframe: Timeframe) -> String {
    let format = timeframe.time_format();
    format!(
        "{:<5}  buy timing: {}  sell timing: {}\n",
        symbol,
        point(timing.buy.as_ref(), format),
        point(timing.sell.as_ref(), format),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrade_core::types::{Side, SignalLabel};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_render_alerts() {
        let alerts = vec![
            Alert {
                timestamp: ts(1_688_045_400),
                side: Side::Buy,
                label: SignalLabel::Buy,
                price: 410.5,
                rsi: Some(31.234),
            },
            Alert {
                timestamp: ts(1_688_049_000),
                side: Side::Sell,
                label: SignalLabel::PotentialSell,
                price: 415.0,
                rsi: None,
            },
        ];

        let out = render_alerts(&alerts, Timeframe::Minute1);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("29/06 13:30"));
        assert!(lines[0].contains("410.50"));
        assert!(lines[0].contains("RSI: 31.23"));
        assert!(lines[1].contains("Sell"));
        assert!(lines[1].contains("n/a"));
        assert!(lines[1].ends_with("PotentialSell"));
    }

    #[test]
    fn test_render_timing() {
        let timing = Timing {
            buy: Some(TimingPoint {
                timestamp: ts(1_688_045_400),
                price: 99.5,
            }),
            sell: None,
        };
        let out = render_timing("NVDA", &timing, Timeframe::Daily);
        assert!(out.contains("buy timing: 99.50 at 29/06/23"));
        assert!(out.contains("sell timing: none"));
    }
}
