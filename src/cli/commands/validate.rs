//! Validate configuration command.

use anyhow::Result;
use daytrade_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Starting balance: {}", config.backtest.starting_balance);
    println!("Minimum commission: {}", config.commission.min_fee);
    println!(
        "RSI filters: buy <= {}, sell >= {}",
        config.strategy.buy_rsi_max, config.strategy.sell_rsi_min
    );
    println!(
        "MACD: {}/{}/{}, RSI: {}, KDJ: {}",
        config.indicators.macd_fast,
        config.indicators.macd_slow,
        config.indicators.macd_signal,
        config.indicators.rsi_period,
        config.indicators.kdj_window
    );
    println!(
        "Instruments: {} tickers at {} from {}",
        config.instruments.tickers.len(),
        config.instruments.timeframe,
        config.instruments.data_dir.display()
    );

    Ok(())
}
