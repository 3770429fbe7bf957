//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BacktestSettings, InstrumentSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(Some(path), true)
}

/// Like [`load_config`], but a missing file (or no path at all) falls back
/// to the built-in defaults, still overridable from the environment.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build(path, false)
}

fn build(path: Option<&Path>, required: bool) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(required));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("DAYTRADE")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("instruments.tickers")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
