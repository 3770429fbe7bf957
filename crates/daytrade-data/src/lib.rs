//! Bar data loading.

mod csv_source;

pub use csv_source::{parse_bars, parse_timestamp, CsvDataSource};

use daytrade_core::error::DataError;
use daytrade_core::types::{BarSeries, Timeframe};
use std::path::Path;

/// Load a validated bar series from a CSV file.
pub async fn load_csv(
    path: impl AsRef<Path>,
    symbol: &str,
    timeframe: Timeframe,
) -> Result<BarSeries, DataError> {
    let source = CsvDataSource::new(path)?;
    source.load_all(symbol, timeframe).await
}
