//! Exponential moving averages.

use daytrade_core::traits::Indicator;

/// Exponential Moving Average (EMA), recursive form.
///
/// Seeded with the first value and reported once `period` values have
/// been seen, so the output matches a non-adjusted exponential mean with a
/// minimum window of `period`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period (span).
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = Vec::with_capacity(data.len());
        let one_minus_mult = 1.0 - self.multiplier;
        let mut ema = None;

        for (i, &price) in data.iter().enumerate() {
            let next = match ema {
                None => price,
                Some(prev) => price * self.multiplier + prev * one_minus_mult,
            };
            ema = Some(next);
            result.push((i + 1 >= self.period).then_some(next));
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Bias-adjusted exponentially weighted mean.
///
/// Each output is the weighted average of every defined input so far with
/// weights `(1 - alpha)^age`, which keeps early values from being pulled
/// toward the first observation. Missing inputs produce missing outputs
/// but still age the earlier weights.
#[derive(Debug, Clone, Copy)]
pub struct Ewm {
    alpha: f64,
}

impl Ewm {
    /// Smoothing from a span: `alpha = 2 / (span + 1)`.
    pub fn from_span(span: usize) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        Self {
            alpha: 2.0 / (span as f64 + 1.0),
        }
    }

    /// Smoothing from a center of mass: `alpha = 1 / (com + 1)`.
    pub fn from_com(com: f64) -> Self {
        assert!(com >= 0.0, "Center of mass must not be negative");
        Self {
            alpha: 1.0 / (com + 1.0),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Smooth a column that may have gaps.
    pub fn smooth(&self, data: &[Option<f64>]) -> Vec<Option<f64>> {
        let decay = 1.0 - self.alpha;
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut started = false;

        data.iter()
            .map(|value| {
                if started {
                    numerator *= decay;
                    denominator *= decay;
                }
                let x = (*value)?;
                started = true;
                numerator += x;
                denominator += 1.0;
                Some(numerator / denominator)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_warmup_is_none() {
        let ema = Ema::new(3);
        let result = ema.calculate(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(result.len(), 4);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        // 1 -> 1.5 -> 2.25 -> 3.125 with multiplier 0.5
        assert!((result[2].unwrap() - 2.25).abs() < 1e-12);
        assert!((result[3].unwrap() - 3.125).abs() < 1e-12);
    }

    #[test]
    fn test_ema_constant_input() {
        let ema = Ema::new(5);
        let result = ema.calculate(&[7.0; 10]);
        assert!(result[4..].iter().all(|v| (v.unwrap() - 7.0).abs() < 1e-12));
    }

    #[test]
    fn test_ewm_adjusted_weights() {
        let ewm = Ewm::from_com(1.0); // alpha 0.5
        let result = ewm.smooth(&[Some(1.0), Some(2.0), Some(3.0)]);

        assert!((result[0].unwrap() - 1.0).abs() < 1e-12);
        // (2 + 0.5*1) / 1.5
        assert!((result[1].unwrap() - 5.0 / 3.0).abs() < 1e-12);
        // (3 + 0.5*2 + 0.25*1) / 1.75
        assert!((result[2].unwrap() - 4.25 / 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_ewm_skips_leading_gaps() {
        let ewm = Ewm::from_span(9);
        let result = ewm.smooth(&[None, None, Some(4.0), Some(4.0)]);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert!((result[2].unwrap() - 4.0).abs() < 1e-12);
        assert!((result[3].unwrap() - 4.0).abs() < 1e-12);
        assert!((ewm.alpha() - 0.2).abs() < 1e-12);
    }
}
