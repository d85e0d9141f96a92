//! Tunable signal parameters and their documented defaults.
//!
//! Every field is optional. `None` means "use the default"; an explicit zero
//! is treated the same way because no parameter has a meaningful zero value
//! and older clients send `0` for "unset". Negative values cannot be
//! represented and are rejected when deserializing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SHORT_WINDOW: u32 = 14;
pub const DEFAULT_LONG_WINDOW: u32 = 50;
pub const DEFAULT_RSI_PERIOD: u32 = 14;
pub const DEFAULT_RSI_OVERBOUGHT: u32 = 70;
pub const DEFAULT_RSI_OVERSOLD: u32 = 30;
pub const DEFAULT_VOLUME_WINDOW: u32 = 20;
pub const DEFAULT_VOLATILITY_WINDOW: u32 = 20;

/// Invalid parameter combinations, reported by [`SignalParameters::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("rsi_oversold ({oversold}) must be below rsi_overbought ({overbought})")]
    ThresholdsInverted { oversold: u32, overbought: u32 },

    #[error("{name} must be within 0..=100, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: u32 },
}

/// The seven tunables of the signal evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParameters {
    pub short_window: Option<u32>,
    pub long_window: Option<u32>,
    pub rsi_period: Option<u32>,
    pub rsi_overbought: Option<u32>,
    pub rsi_oversold: Option<u32>,
    pub volume_window: Option<u32>,
    pub volatility_window: Option<u32>,
}

/// Unset or zero → default.
fn or_default(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v != 0 => v,
        _ => default,
    }
}

impl SignalParameters {
    /// Fill every unset field with its default. Idempotent.
    pub fn with_defaults(self) -> Self {
        Self {
            short_window: Some(self.short_window()),
            long_window: Some(self.long_window()),
            rsi_period: Some(self.rsi_period()),
            rsi_overbought: Some(self.rsi_overbought()),
            rsi_oversold: Some(self.rsi_oversold()),
            volume_window: Some(self.volume_window()),
            volatility_window: Some(self.volatility_window()),
        }
    }

    /// Overlay the fields set in `other` on top of `self`.
    pub fn merge(self, other: SignalParameters) -> Self {
        Self {
            short_window: other.short_window.or(self.short_window),
            long_window: other.long_window.or(self.long_window),
            rsi_period: other.rsi_period.or(self.rsi_period),
            rsi_overbought: other.rsi_overbought.or(self.rsi_overbought),
            rsi_oversold: other.rsi_oversold.or(self.rsi_oversold),
            volume_window: other.volume_window.or(self.volume_window),
            volatility_window: other.volatility_window.or(self.volatility_window),
        }
    }

    /// Reject threshold combinations that make the momentum rule meaningless.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let overbought = self.rsi_overbought();
        let oversold = self.rsi_oversold();
        if overbought > 100 {
            return Err(ParamsError::ThresholdOutOfRange {
                name: "rsi_overbought",
                value: overbought,
            });
        }
        if oversold > 100 {
            return Err(ParamsError::ThresholdOutOfRange {
                name: "rsi_oversold",
                value: oversold,
            });
        }
        if oversold >= overbought {
            return Err(ParamsError::ThresholdsInverted {
                oversold,
                overbought,
            });
        }
        Ok(())
    }

    pub fn short_window(&self) -> u32 {
        or_default(self.short_window, DEFAULT_SHORT_WINDOW)
    }

    pub fn long_window(&self) -> u32 {
        or_default(self.long_window, DEFAULT_LONG_WINDOW)
    }

    pub fn rsi_period(&self) -> u32 {
        or_default(self.rsi_period, DEFAULT_RSI_PERIOD)
    }

    pub fn rsi_overbought(&self) -> u32 {
        or_default(self.rsi_overbought, DEFAULT_RSI_OVERBOUGHT)
    }

    pub fn rsi_oversold(&self) -> u32 {
        or_default(self.rsi_oversold, DEFAULT_RSI_OVERSOLD)
    }

    pub fn volume_window(&self) -> u32 {
        or_default(self.volume_window, DEFAULT_VOLUME_WINDOW)
    }

    pub fn volatility_window(&self) -> u32 {
        or_default(self.volatility_window, DEFAULT_VOLATILITY_WINDOW)
    }
}
