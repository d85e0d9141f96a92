//! Rolling volatility.
//!
//! Population standard deviation of simple returns over a trailing window.
//! Returns are `(v[i] - v[i-1]) / v[i-1]`, or 0 when the prior value is 0.
//! Warmup policy: indices below `window` are 0.

use super::Indicator;

/// Window used when the requested one is below 2.
pub const FALLBACK_WINDOW: usize = 20;

#[derive(Debug, Clone)]
pub struct Volatility {
    window: usize,
    name: String,
}

impl Volatility {
    /// Windows below 2 fall back to 20.
    pub fn new(window: usize) -> Self {
        let window = if window < 2 { FALLBACK_WINDOW } else { window };
        Self {
            window,
            name: format!("volatility_{window}"),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![0.0; n];
        let returns = simple_returns(values);
        let window = self.window;

        for i in window..n {
            let slice = &returns[i + 1 - window..=i];
            let mean = slice.iter().sum::<f64>() / window as f64;
            let variance = slice
                .iter()
                .map(|r| {
                    let diff = r - mean;
                    diff * diff
                })
                .sum::<f64>()
                / window as f64;
            result[i] = variance.sqrt();
        }

        result
    }
}

/// Per-sample simple returns. Index 0 and zero-priced predecessors yield 0.
fn simple_returns(values: &[f64]) -> Vec<f64> {
    let mut returns = vec![0.0; values.len()];
    for i in 1..values.len() {
        let prev = values[i - 1];
        if prev != 0.0 {
            returns[i] = (values[i] - prev) / prev;
        }
    }
    returns
}

/// Rolling volatility of `values` over `window` returns.
pub fn volatility(values: &[f64], window: usize) -> Vec<f64> {
    Volatility::new(window).compute(values)
}
