//! Indicator library.
//!
//! Every indicator maps an ordered value series to an output series of the
//! same length, where output index `i` only depends on inputs `0..=i`. The
//! latest value is always the last element.
//!
//! Unlike NaN-warmup indicators, these never emit undefined values: each one
//! has an explicit warmup policy (identity, neutral midpoint, or zero-fill) so
//! a short history still yields a usable latest value.

pub mod rsi;
pub mod sma;
pub mod volatility;

pub use rsi::{rsi, Rsi};
pub use sma::{sma, Sma};
pub use volatility::{volatility, Volatility};

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// No output value at index t may depend on input data from index t+1 or
/// later. Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_14", "rsi_14").
    fn name(&self) -> &str;

    /// Number of samples consumed before the output stops using its warmup policy.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire input series.
    ///
    /// Returns a `Vec<f64>` of the same length as `values`.
    fn compute(&self, values: &[f64]) -> Vec<f64>;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
