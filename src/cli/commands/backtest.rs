//! Backtest command implementation.

use anyhow::{Context, Result};
use daytrade_backtest::{format_money, BacktestConfig, BacktestEngine, BacktestReport};
use daytrade_config::AppConfig;
use daytrade_strategies::MacdRsiStrategy;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{error, info};

use crate::cli::{BacktestArgs, OutputFormat};

pub async fn run(args: BacktestArgs, config: &AppConfig) -> Result<()> {
    let timeframe = super::timeframe(&args.data, config)?;
    let symbols = if args.symbols.is_empty() {
        config.instruments.tickers.clone()
    } else {
        args.symbols.clone()
    };
    if symbols.is_empty() {
        anyhow::bail!("No symbols given and none configured under [instruments]");
    }

    let backtest_config = BacktestConfig {
        starting_balance: args.balance.unwrap_or(config.backtest.starting_balance),
        commission: config.commission.clone(),
    };
    backtest_config.validate()?;
    let engine = BacktestEngine::new(backtest_config);

    info!(symbols = symbols.len(), %timeframe, "starting backtest");

    let mut reports = Vec::new();
    for symbol in &symbols {
        match run_symbol(&engine, &args, config, symbol, timeframe).await {
            Ok(report) => reports.push(report),
            Err(e) => error!(symbol = %symbol, "backtest failed: {:#}", e),
        }
    }

    if reports.is_empty() {
        anyhow::bail!("No symbol could be backtested");
    }

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.summary());
                if args.trades {
                    print!("{}", report.trade_log());
                    println!();
                }
            }
            if reports.len() > 1 {
                print_overview(&reports);
            }
        }
    }

    if let Some(dir) = &args.save {
        for report in &reports {
            save(report, dir)?;
        }
        info!("Results saved to {:?}", dir);
    }

    Ok(())
}

async fn run_symbol(
    engine: &BacktestEngine,
    args: &BacktestArgs,
    config: &AppConfig,
    symbol: &str,
    timeframe: daytrade_core::types::Timeframe,
) -> Result<BacktestReport> {
    let series = super::load_series(&args.data, config, symbol, timeframe).await?;
    let mut strategy = MacdRsiStrategy::new(config.strategy.clone());
    let report = engine
        .run(&mut strategy, &series)
        .with_context(|| format!("Backtest of {} failed", symbol))?;
    Ok(report)
}

fn print_overview(reports: &[BacktestReport]) {
    println!("{:<6} {:>8} {:>16} {:>10}", "Symbol", "Trades", "Total Value", "Return");
    for report in reports {
        println!(
            "{:<6} {:>8} {:>16} {:>9.2}%",
            report.symbol,
            report.stats.total_trades,
            format_money(report.total_asset_value()),
            report.stats.total_return_pct,
        );
    }
    let total: Decimal = reports.iter().map(|r| r.total_asset_value()).sum();
    println!("{:<6} {:>8} {:>16}", "All", "", format_money(total));
}

fn save(report: &BacktestReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let json_path = dir.join(format!("{}_report.json", report.symbol));
    std::fs::write(&json_path, report.to_json()?)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    let csv_path = dir.join(format!("{}_ledger.csv", report.symbol));
    std::fs::write(&csv_path, report.ledger_to_csv())
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    Ok(())
}
