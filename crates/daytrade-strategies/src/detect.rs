//! Whole-series signal detection.

use daytrade_core::error::SignalError;
use daytrade_core::traits::Strategy;
use daytrade_core::types::{Bar, BarSeries, LabeledBar};
use tracing::info;

use crate::MacdRsiStrategy;

/// Label every bar of `series` with the default MACD/RSI strategy.
pub fn detect_signals(series: &BarSeries) -> Result<Vec<LabeledBar>, SignalError> {
    let mut strategy = MacdRsiStrategy::default();
    detect_signals_with(&mut strategy, series.bars())
}

/// Label every bar with `strategy`, starting from a fresh state.
///
/// The bars are validated first, so a raw slice that is empty, unordered
/// or malformed fails with [`SignalError::InvalidSeries`].
pub fn detect_signals_with(
    strategy: &mut dyn Strategy,
    bars: &[Bar],
) -> Result<Vec<LabeledBar>, SignalError> {
    BarSeries::validate(bars)?;
    strategy.reset();

    let labeled = bars
        .iter()
        .enumerate()
        .map(|(index, bar)| Ok(LabeledBar::new(*bar, strategy.on_bar(index, bar)?)))
        .collect::<Result<Vec<_>, SignalError>>()?;

    let state = strategy.state();
    info!(
        strategy = strategy.name(),
        bars = state.bars_processed,
        actionable = state.actionable_signals,
        potential = state.potential_signals,
        "signal detection complete"
    );
    Ok(labeled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrade_core::error::SeriesError;
    use daytrade_core::types::{SignalLabel, Timeframe};

    fn bar(i: i64, macd: Option<(f64, f64)>, rsi: f64) -> Bar {
        let bar = Bar::new(i * 60_000, 10.0, 11.0, 9.0, 10.0, 100.0).with_rsi(rsi);
        match macd {
            Some((dif, dem)) => bar.with_macd(dif, dem),
            None => bar,
        }
    }

    #[test]
    fn test_all_undefined_without_indicators() {
        let bars = vec![bar(0, None, 50.0), bar(1, None, 50.0), bar(2, None, 50.0)];
        let series = BarSeries::new("TEST", Timeframe::Minute1, bars).unwrap();

        let labeled = detect_signals(&series).unwrap();
        assert_eq!(labeled.len(), 3);
        assert!(labeled.iter().all(|l| l.signal == SignalLabel::Undefined));
    }

    #[test]
    fn test_labels_do_not_change_bars() {
        let bars = vec![
            bar(0, Some((-1.0, -0.5)), 30.0),
            bar(1, Some((-0.2, -0.4)), 30.0),
        ];
        let series = BarSeries::new("TEST", Timeframe::Minute1, bars.clone()).unwrap();

        let labeled = detect_signals(&series).unwrap();
        assert_eq!(labeled[0].bar, bars[0]);
        assert_eq!(labeled[1].signal, SignalLabel::Buy);
    }

    #[test]
    fn test_strategy_is_reset_between_runs() {
        let bars = vec![
            bar(0, Some((-1.0, -0.5)), 30.0),
            bar(1, Some((-0.2, -0.4)), 30.0),
        ];
        let mut strategy = MacdRsiStrategy::default();

        let first = detect_signals_with(&mut strategy, &bars).unwrap();
        let second = detect_signals_with(&mut strategy, &bars).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_slice_is_invalid() {
        let mut strategy = MacdRsiStrategy::default();
        let err = detect_signals_with(&mut strategy, &[]).unwrap_err();
        assert_eq!(err, SignalError::InvalidSeries(SeriesError::Empty));
    }
}
