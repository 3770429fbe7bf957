//! Day-trade signal and simulation CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use daytrade_config::load_or_default;
use daytrade_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ValidateConfig = cli.command {
        setup_logging(level(&cli, "info"), cli.json_logs);
        return cli::commands::validate::run(&cli.config).await;
    }

    let config = load_or_default(Some(&cli.config))
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    config.validate()?;

    let json = cli.json_logs || config.logging.format == "json";
    setup_logging(level(&cli, &config.logging.level), json);

    match cli.command {
        Commands::Backtest(args) => cli::commands::backtest::run(args, &config).await,
        Commands::Signals(args) => cli::commands::signals::run(args, &config).await,
        Commands::ValidateConfig => Ok(()),
    }
}

fn level<'a>(cli: &Cli, configured: &'a str) -> &'a str {
    cli.log_level.map_or(configured, |l| l.as_str())
}
