//! CSV data source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use daytrade_core::error::DataError;
use daytrade_core::types::{Bar, BarSeries, IndicatorValues, Timeframe};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CSV record format.
///
/// Indicator columns are optional; empty cells read as missing.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "Datetime",
        alias = "datetime",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    date: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close", default)]
    close: Option<f64>,
    #[serde(rename = "Adj Close", alias = "adj_close", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", default)]
    volume: Option<f64>,
    #[serde(alias = "DIF", default)]
    dif: Option<f64>,
    #[serde(alias = "DEM", default)]
    dem: Option<f64>,
    #[serde(alias = "Histogram", default)]
    histogram: Option<f64>,
    #[serde(alias = "RSI", default)]
    rsi: Option<f64>,
    #[serde(alias = "K", default)]
    k: Option<f64>,
    #[serde(alias = "D", default)]
    d: Option<f64>,
    #[serde(alias = "J", default)]
    j: Option<f64>,
}

impl CsvRecord {
    fn into_bar(self, row: usize) -> Result<Bar, DataError> {
        let timestamp = parse_timestamp(&self.date)?;
        let close = self.close.or(self.adj_close).ok_or_else(|| {
            DataError::ParseError(format!("row {}: missing Close", row))
        })?;

        Ok(Bar::new(
            timestamp,
            self.open,
            self.high,
            self.low,
            close,
            self.volume.unwrap_or(0.0),
        )
        .with_indicators(IndicatorValues {
            dif: self.dif,
            dem: self.dem,
            histogram: self.histogram,
            rsi: self.rsi,
            k: self.k,
            d: self.d,
            j: self.j,
        }))
    }
}

/// CSV data source for historical data.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all bars from the CSV file into a validated series.
    pub async fn load_all(&self, symbol: &str, timeframe: Timeframe) -> Result<BarSeries, DataError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DataError::ParseError(format!("{}: {}", self.path.display(), e)))?;

        let bars = parse_bars(&text)?;
        if bars.is_empty() {
            return Err(DataError::NoDataAvailable(symbol.to_string()));
        }

        let series = BarSeries::new(symbol, timeframe, bars)?;
        info!(
            symbol,
            %timeframe,
            bars = series.len(),
            path = %self.path.display(),
            with_macd = series.has_macd(),
            "loaded bars"
        );
        Ok(series)
    }
}

/// Parse CSV text into bars sorted by timestamp.
pub fn parse_bars(text: &str) -> Result<Vec<Bar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut bars = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        bars.push(record.into_bar(row + 1)?);
    }

    bars.sort_by_key(|b| b.timestamp);
    debug!(rows = bars.len(), "parsed csv");
    Ok(bars)
}

/// Parse various timestamp formats into Unix milliseconds.
pub fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let date_str = date_str.trim();

    // Zoned timestamps as written by market data exports
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Ok(dt.timestamp_millis());
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // Unix timestamp, milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
