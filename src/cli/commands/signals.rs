//! Signals command implementation.

use anyhow::{Context, Result};
use daytrade_config::AppConfig;
use daytrade_monitor::{render_alerts, render_timing};
use daytrade_strategies::{alerts, detect_signals_with, latest_timing, MacdRsiStrategy};
use serde_json::json;

use crate::cli::{OutputFormat, SignalsArgs};

pub async fn run(args: SignalsArgs, config: &AppConfig) -> Result<()> {
    let timeframe = super::timeframe(&args.data, config)?;
    let series = super::load_series(&args.data, config, &args.symbol, timeframe).await?;

    let mut strategy = MacdRsiStrategy::new(config.strategy.clone());
    let labeled = detect_signals_with(&mut strategy, series.bars())
        .with_context(|| format!("Signal detection for {} failed", args.symbol))?;

    let alerts = alerts(&labeled);
    let timing = latest_timing(&labeled);

    match args.output {
        OutputFormat::Json => {
            let out = json!({
                "symbol": args.symbol,
                "timeframe": timeframe,
                "alerts": alerts,
                "timing": timing,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            print!("{}", render_alerts(&alerts, timeframe));
            print!("{}", render_timing(&args.symbol, &timing, timeframe));
        }
    }

    Ok(())
}
