//! Configuration structures.

use daytrade_core::error::DaytradeError;
use daytrade_core::traits::StrategyConfig;
use daytrade_core::types::Timeframe;
use daytrade_indicators::IndicatorSettings;
use daytrade_risk::CommissionSchedule;
use daytrade_strategies::MacdRsiConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub commission: CommissionSchedule,
    #[serde(default)]
    pub strategy: MacdRsiConfig,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub instruments: InstrumentSettings,
}

impl AppConfig {
    /// Check every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), DaytradeError> {
        if self.backtest.starting_balance < Decimal::ZERO {
            return Err(DaytradeError::Config(format!(
                "backtest.starting_balance must not be negative, got {}",
                self.backtest.starting_balance
            )));
        }
        self.commission.validate()?;
        self.strategy.validate()?;
        self.indicators.validate()?;
        if self.instruments.tickers.iter().any(|t| t.trim().is_empty()) {
            return Err(DaytradeError::Config(
                "instruments.tickers contains an empty symbol".to_string(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(DaytradeError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "daytrade".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSettings {
    pub starting_balance: Decimal,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            starting_balance: dec!(10000),
        }
    }
}

/// Instruments to run and where their bars live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentSettings {
    pub tickers: Vec<String>,
    /// Directory holding `<SYMBOL>_<timeframe>.csv` files
    pub data_dir: PathBuf,
    pub timeframe: Timeframe,
}

impl Default for InstrumentSettings {
    fn default() -> Self {
        let tickers = [
            "NVDA", "MSFT", "META", "TSM", "GOOGL", "AMZN", "QCOM", "AMD", "ORCL", "VZ", "NFLX",
            "JPM", "GS", "MS", "WFC", "BAC", "V", "MA", "AXP", "CVX", "XOM", "MCD", "PEP", "KO",
            "PG", "ABBV", "MRK", "LLY", "UNH", "PFE", "JNJ", "SPY", "SPLG",
        ];
        Self {
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
            data_dir: PathBuf::from("data"),
            timeframe: Timeframe::Minute1,
        }
    }
}

impl InstrumentSettings {
    /// Path of the bar file for `symbol` at `timeframe`.
    pub fn data_path(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        self.data_dir.join(format!("{}_{}.csv", symbol, timeframe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backtest.starting_balance, dec!(10000));
        assert_eq!(config.instruments.tickers.len(), 33);
        assert_eq!(config.instruments.tickers[0], "NVDA");
    }

    #[test]
    fn test_data_path() {
        let instruments = InstrumentSettings::default();
        assert_eq!(
            instruments.data_path("NVDA", Timeframe::Minute1),
            PathBuf::from("data").join("NVDA_1m.csv")
        );
    }

    #[test]
    fn test_validate_rejects_bad_sections() {
        let mut config = AppConfig::default();
        config.backtest.starting_balance = dec!(-5);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.strategy.sell_rsi_min = 150.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.indicators.macd_fast = 30;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [backtest]
            starting_balance = 2500

            [strategy]
            sell_rsi_min = 60.0

            [instruments]
            tickers = ["AAPL"]
            "#,
        )
        .unwrap();

        assert_eq!(config.backtest.starting_balance, dec!(2500));
        assert_eq!(config.strategy.sell_rsi_min, 60.0);
        assert_eq!(config.strategy.buy_rsi_max, 100.0);
        assert_eq!(config.instruments.tickers, vec!["AAPL".to_string()]);
        assert_eq!(config.commission, CommissionSchedule::default());
        assert_eq!(config.indicators.macd_slow, 26);
    }
}
