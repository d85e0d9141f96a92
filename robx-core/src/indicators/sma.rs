//! Simple Moving Average (SMA).
//!
//! Rolling mean over a trailing window, maintained with a running sum.
//! Warmup policy: while fewer than `window` samples exist, the output is the
//! input value itself. `window <= 1` is the identity.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    name: String,
}

impl Sma {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            name: format!("sma_{window}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        if self.window <= 1 {
            return values.to_vec();
        }

        let window = self.window;
        let mut result = Vec::with_capacity(values.len());
        let mut sum = 0.0;

        for (i, &value) in values.iter().enumerate() {
            sum += value;
            if i >= window {
                sum -= values[i - window];
            }
            if i + 1 >= window {
                result.push(sum / window as f64);
            } else {
                result.push(value);
            }
        }

        result
    }
}

/// Simple moving average of `values` over `window` samples.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    Sma::new(window).compute(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let result = sma(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0], 5);

        assert_eq!(result.len(), 7);
        // Warmup echoes the input
        assert_eq!(&result[..4], &[10.0, 11.0, 12.0, 13.0]);
        // SMA[4] = mean(10,11,12,13,14) = 12.0
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        let values = [100.0, 200.0, 300.0];
        assert_eq!(sma(&values, 1), values.to_vec());
    }

    #[test]
    fn sma_0_is_identity() {
        let values = [4.0, 8.0];
        assert_eq!(sma(&values, 0), values.to_vec());
    }

    #[test]
    fn sma_too_few_values_echoes_input() {
        let values = [10.0, 11.0];
        assert_eq!(sma(&values, 5), values.to_vec());
    }

    #[test]
    fn sma_empty_input() {
        assert!(sma(&[], 14).is_empty());
    }

    #[test]
    fn sma_running_sum_matches_resum() {
        let values: Vec<f64> = (0..40).map(|i| ((i * 7) % 11) as f64 + 0.25).collect();
        let window = 6;
        let result = sma(&values, window);
        for i in (window - 1)..values.len() {
            let expected: f64 = values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert_approx(result[i], expected, 1e-9);
        }
    }

    #[test]
    fn sma_name_and_lookback() {
        let indicator = Sma::new(20);
        assert_eq!(indicator.name(), "sma_20");
        assert_eq!(indicator.lookback(), 19);
        assert_eq!(Sma::new(0).lookback(), 0);
    }
}
