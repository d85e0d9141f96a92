//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! Warmup policy: index 0 and indices `1..=period` report the neutral
//! midpoint (50) while raw gains and losses accumulate. The seed averages are
//! the warmup sums divided by `period`; every later sample is blended in with
//! weight `1/period`.
//! Edge cases: no movement at all → 50; avg_loss == 0 → 100.

use super::Indicator;

/// Neutral RSI value used before enough history exists.
pub const RSI_MIDPOINT: f64 = 50.0;

/// Period used when the requested one is below 2.
pub const FALLBACK_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    /// Periods below 2 fall back to 14.
    pub fn new(period: usize) -> Self {
        let period = if period < 2 { FALLBACK_PERIOD } else { period };
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let mut result = vec![RSI_MIDPOINT; n];
        let period = self.period as f64;

        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;

        for i in 1..n {
            let change = closes[i] - closes[i - 1];
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);

            if i <= self.period {
                // Accumulate sums; turned into averages once warmup completes
                avg_gain += gain;
                avg_loss += loss;
                if i == self.period {
                    avg_gain /= period;
                    avg_loss /= period;
                }
                continue;
            }

            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            result[i] = compute_rsi(avg_gain, avg_loss);
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        RSI_MIDPOINT // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// RSI of `closes` with the given smoothing period.
pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    Rsi::new(period).compute(closes)
}
