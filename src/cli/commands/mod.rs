//! CLI command implementations.

pub mod backtest;
pub mod signals;
pub mod validate;

use anyhow::{Context, Result};
use daytrade_config::AppConfig;
use daytrade_core::types::{BarSeries, Timeframe};
use daytrade_data::CsvDataSource;
use daytrade_indicators::attach_indicators;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::DataArgs;

/// Resolve the timeframe from the flag or the configuration.
pub fn timeframe(args: &DataArgs, config: &AppConfig) -> Result<Timeframe> {
    match &args.timeframe {
        Some(tf) => tf.parse::<Timeframe>().context("Invalid --timeframe"),
        None => Ok(config.instruments.timeframe),
    }
}

fn data_path(args: &DataArgs, config: &AppConfig, symbol: &str, timeframe: Timeframe) -> PathBuf {
    match &args.data {
        Some(path) if path.is_dir() => path.join(format!("{}_{}.csv", symbol, timeframe)),
        Some(path) => path.clone(),
        None => config.instruments.data_path(symbol, timeframe),
    }
}

/// Load `symbol`'s bars and make sure they carry indicator columns.
pub async fn load_series(
    args: &DataArgs,
    config: &AppConfig,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<BarSeries> {
    let path = data_path(args, config, symbol, timeframe);
    let source = CsvDataSource::new(&path)
        .with_context(|| format!("No bar data for {} at {}", symbol, path.display()))?;
    let mut series = source
        .load_all(symbol, timeframe)
        .await
        .with_context(|| format!("Failed to load {}", path.display()))?;

    if args.recompute_indicators || !series.has_macd() {
        attach_indicators(&mut series, &config.indicators)
            .with_context(|| format!("Failed to compute indicators for {}", symbol))?;
    } else {
        debug!(symbol, "using indicator columns from csv");
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrade_core::error::DataError;

    fn data_args(timeframe: Option<&str>) -> DataArgs {
        DataArgs {
            data: None,
            timeframe: timeframe.map(str::to_string),
            recompute_indicators: false,
        }
    }

    #[test]
    fn test_timeframe_flag_overrides_config() {
        let config = AppConfig::default();
        assert_eq!(timeframe(&data_args(None), &config).unwrap(), Timeframe::Minute1);
        assert_eq!(
            timeframe(&data_args(Some("15m")), &config).unwrap(),
            Timeframe::Minute15
        );
    }

    #[test]
    fn test_bad_timeframe_flag() {
        let err = timeframe(&data_args(Some("2w")), &AppConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::InvalidTimeframe(s)) if s == "2w"
        ));
    }
}
