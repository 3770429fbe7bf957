//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Timeframe;
use crate::error::SeriesError;

/// Indicator columns attached to a bar.
///
/// Every field is `None` until its smoothing window has filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    /// MACD line (fast EMA - slow EMA)
    pub dif: Option<f64>,
    /// Signal line (smoothed DIF)
    pub dem: Option<f64>,
    /// DIF - DEM
    pub histogram: Option<f64>,
    /// Relative strength index, 0..=100
    pub rsi: Option<f64>,
    /// Stochastic %K
    pub k: Option<f64>,
    /// Smoothed %K
    pub d: Option<f64>,
    /// 3K - 2D
    pub j: Option<f64>,
}

impl IndicatorValues {
    /// Both MACD lines, only when both are defined.
    #[inline]
    pub fn macd_pair(&self) -> Option<(f64, f64)> {
        match (self.dif, self.dem) {
            (Some(dif), Some(dem)) => Some((dif, dem)),
            _ => None,
        }
    }
}

/// One OHLCV sample with its indicator columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
    /// Indicator columns aligned to this bar
    #[serde(default)]
    pub indicators: IndicatorValues,
}

impl Bar {
    /// Create a new bar with no indicators.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            indicators: IndicatorValues::default(),
        }
    }

    /// Attach MACD lines.
    pub fn with_macd(mut self, dif: f64, dem: f64) -> Self {
        self.indicators.dif = Some(dif);
        self.indicators.dem = Some(dem);
        self.indicators.histogram = Some(dif - dem);
        self
    }

    /// Attach an RSI value.
    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.indicators.rsi = Some(rsi);
        self
    }

    /// Replace all indicator columns.
    pub fn with_indicators(mut self, indicators: IndicatorValues) -> Self {
        self.indicators = indicators;
        self
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn check(&self, index: usize) -> Result<(), SeriesError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SeriesError::InvalidValue {
                    index,
                    field,
                    value,
                });
            }
        }
        if self.high < self.low {
            return Err(SeriesError::HighBelowLow {
                index,
                high: self.high,
                low: self.low,
            });
        }
        Ok(())
    }
}

impl Default for Bar {
    fn default() -> Self {
        Self::new(0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }
}

/// Validated, time-ordered bars for one instrument.
///
/// Timestamps are strictly increasing and every bar has sane prices.
/// Only indicator columns may change after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Timeframe of the bars
    pub timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series, rejecting empty, unordered or malformed input.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        bars: Vec<Bar>,
    ) -> Result<Self, SeriesError> {
        Self::validate(&bars)?;
        Ok(Self {
            symbol: symbol.into(),
            timeframe,
            bars,
        })
    }

    /// Check the series invariants on a slice of bars.
    pub fn validate(bars: &[Bar]) -> Result<(), SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (index, bar) in bars.iter().enumerate() {
            bar.check(index)?;
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(SeriesError::NotTimeOrdered {
                    index,
                    timestamp: bar.timestamp,
                });
            }
        }
        Ok(())
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Overwrite the indicator columns, one entry per bar.
    ///
    /// Extra entries are ignored; missing entries leave the bar untouched.
    pub fn set_indicators(&mut self, columns: impl IntoIterator<Item = IndicatorValues>) {
        for (bar, values) in self.bars.iter_mut().zip(columns) {
            bar.indicators = values;
        }
    }

    /// True when any bar carries a MACD pair.
    pub fn has_macd(&self) -> bool {
        self.bars.iter().any(|b| b.indicators.macd_pair().is_some())
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
