//! Momentum indicators.

use daytrade_core::traits::Indicator;
use serde::{Deserialize, Serialize};

use crate::moving_average::{Ema, Ewm};

/// Relative Strength Index (RSI).
///
/// Gains and losses are smoothed with a recursive exponential mean,
/// `alpha = 1 / period`, seeded at the first bar with a change of zero.
/// Values are reported from bar `period - 1`.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let alpha = 1.0 / self.period as f64;
        let (mut avg_gain, mut avg_loss) = (0.0, 0.0);

        data.iter()
            .enumerate()
            .map(|(i, &price)| {
                let change = if i == 0 { 0.0 } else { price - data[i - 1] };
                let (gain, loss) = if change > 0.0 {
                    (change, 0.0)
                } else {
                    (0.0, -change)
                };
                avg_gain += alpha * (gain - avg_gain);
                avg_loss += alpha * (loss - avg_loss);

                if i + 1 < self.period {
                    return None;
                }
                Some(if avg_loss == 0.0 {
                    100.0
                } else {
                    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
                })
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// DIF: fast EMA - slow EMA
    pub dif: f64,
    /// DEM: smoothed DIF
    pub dem: f64,
    /// DIF minus DEM smoothed once more with the signal span
    pub histogram: f64,
}

/// MACD indicator producing DIF, DEM and histogram columns.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    /// DIF is defined once the slow EMA is. DEM and the histogram are
    /// defined on exactly the same bars, since both smoothings are
    /// bias-adjusted means that start with the first defined input.
    fn calculate(&self, data: &[f64]) -> Vec<Option<MacdOutput>> {
        let fast = Ema::new(self.fast_period).calculate(data);
        let slow = Ema::new(self.slow_period).calculate(data);

        let dif: Vec<Option<f64>> = fast
            .iter()
            .zip(slow.iter())
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();
        let signal = Ewm::from_span(self.signal_period);
        let dem = signal.smooth(&dif);
        let dem_smoothed = signal.smooth(&dem);

        dif.iter()
            .zip(dem.iter())
            .zip(dem_smoothed.iter())
            .map(|((dif, dem), dem_smoothed)| {
                let (dif, dem, dem_smoothed) = ((*dif)?, (*dem)?, (*dem_smoothed)?);
                Some(MacdOutput {
                    dif,
                    dem,
                    histogram: dif - dem_smoothed,
                })
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow_period
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// KDJ output for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdjOutput {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

/// KDJ: raw stochastic %K, its smoothed %D, and `J = 3K - 2D`.
///
/// A window with no range has no %K, so that bar has no output.
#[derive(Debug, Clone)]
pub struct Kdj {
    window: usize,
    smoothing_com: f64,
}

impl Kdj {
    /// Create a KDJ with default parameters (window 9, D smoothing com 2).
    pub fn new() -> Self {
        Self::with_params(9, 2.0)
    }

    pub fn with_params(window: usize, smoothing_com: f64) -> Self {
        assert!(window > 0, "Window must be greater than 0");
        Self {
            window,
            smoothing_com,
        }
    }

    /// Calculate KDJ from high/low/close columns.
    pub fn calculate_hlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<KdjOutput>> {
        let len = high.len().min(low.len()).min(close.len());

        let k: Vec<Option<f64>> = (0..len)
            .map(|i| {
                if i + 1 < self.window {
                    return None;
                }
                let start = i + 1 - self.window;
                let highest = high[start..=i]
                    .iter()
                    .cloned()
                    .fold(f64::NEG_INFINITY, f64::max);
                let lowest = low[start..=i]
                    .iter()
                    .cloned()
                    .fold(f64::INFINITY, f64::min);

                let range = highest - lowest;
                (range != 0.0).then(|| ((close[i] - lowest) / range) * 100.0)
            })
            .collect();
        let d = Ewm::from_com(self.smoothing_com).smooth(&k);

        k.iter()
            .zip(d.iter())
            .map(|(k, d)| {
                let (k, d) = ((*k)?, (*d)?);
                Some(KdjOutput {
                    k,
                    d,
                    j: 3.0 * k - 2.0 * d,
                })
            })
            .collect()
    }
}

impl Default for Kdj {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Kdj {
    type Output = KdjOutput;

    /// Close-only approximation; prefer `calculate_hlc`.
    fn calculate(&self, data: &[f64]) -> Vec<Option<KdjOutput>> {
        self.calculate_hlc(data, data, data)
    }

    fn period(&self) -> usize {
        self.window
    }

    fn name(&self) -> &str {
        "KDJ"
    }
}
