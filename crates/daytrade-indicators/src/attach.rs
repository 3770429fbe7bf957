//! Fill a bar series with indicator columns.

use daytrade_core::error::IndicatorError;
use daytrade_core::traits::Indicator;
use daytrade_core::types::{BarSeries, IndicatorValues};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::momentum::{Kdj, Macd, Rsi};

/// Indicator periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub kdj_window: usize,
    pub kdj_smoothing_com: f64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            kdj_window: 9,
            kdj_smoothing_com: 2.0,
        }
    }
}

impl IndicatorSettings {
    /// Reject periods the indicators cannot work with.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.macd_fast == 0 || self.macd_signal == 0 || self.rsi_period == 0 || self.kdj_window == 0
        {
            return Err(IndicatorError::InvalidParameter(
                "Indicator periods must be greater than 0".into(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD fast period ({}) must be less than slow period ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.kdj_smoothing_com.is_nan() || self.kdj_smoothing_com < 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "KDJ smoothing must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Compute MACD, RSI and KDJ for every bar and store them on the series.
///
/// Existing indicator columns are replaced.
pub fn attach_indicators(
    series: &mut BarSeries,
    settings: &IndicatorSettings,
) -> Result<(), IndicatorError> {
    settings.validate()?;

    let closes = series.closes();
    let macd = Macd::with_periods(settings.macd_fast, settings.macd_slow, settings.macd_signal)
        .calculate(&closes);
    let rsi = Rsi::new(settings.rsi_period).calculate(&closes);
    let kdj = Kdj::with_params(settings.kdj_window, settings.kdj_smoothing_com).calculate_hlc(
        &series.highs(),
        &series.lows(),
        &closes,
    );

    let columns = macd
        .iter()
        .zip(rsi.iter())
        .zip(kdj.iter())
        .map(|((macd, rsi), kdj)| IndicatorValues {
            dif: macd.map(|m| m.dif),
            dem: macd.map(|m| m.dem),
            histogram: macd.map(|m| m.histogram),
            rsi: *rsi,
            k: kdj.map(|o| o.k),
            d: kdj.map(|o| o.d),
            j: kdj.map(|o| o.j),
        });
    series.set_indicators(columns);

    debug!(
        symbol = %series.symbol,
        bars = series.len(),
        first_macd = macd.iter().position(Option::is_some),
        "indicators attached"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrade_core::types::{Bar, Timeframe};

    fn series(len: usize) -> BarSeries {
        let bars = (0..len)
            .map(|i| {
                let price = 100.0 + (i as f64 * 0.3).sin() * 8.0;
                Bar::new(i as i64 * 60_000, price, price + 1.0, price - 1.0, price, 500.0)
            })
            .collect();
        BarSeries::new("TEST", Timeframe::Minute1, bars).unwrap()
    }

    #[test]
    fn test_attach_fills_columns() {
        let mut series = series(60);
        attach_indicators(&mut series, &IndicatorSettings::default()).unwrap();

        let early = series.get(10).unwrap().indicators;
        assert!(early.dif.is_none());
        assert!(early.dem.is_none());
        assert!(early.k.is_some());

        let late = series.get(40).unwrap().indicators;
        assert!(late.macd_pair().is_some());
        assert!(late.rsi.is_some());
        assert!(late.j.is_some());
    }

    #[test]
    fn test_dif_and_dem_defined_together() {
        let mut series = series(80);
        attach_indicators(&mut series, &IndicatorSettings::default()).unwrap();

        for bar in series.iter() {
            assert_eq!(bar.indicators.dif.is_some(), bar.indicators.dem.is_some());
        }
        assert_eq!(
            series.iter().position(|b| b.indicators.dif.is_some()),
            Some(25)
        );
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = IndicatorSettings {
            macd_fast: 30,
            ..Default::default()
        };
        let mut series = series(40);
        assert!(attach_indicators(&mut series, &settings).is_err());
    }
}
