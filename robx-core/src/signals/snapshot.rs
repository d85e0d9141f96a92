//! Indicator snapshot: the rounded latest indicator values of one evaluation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed vocabulary of snapshot keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorName {
    Close,
    SmaShort,
    SmaLong,
    Rsi,
    Volume,
    VolumeMa,
    VolumeRatio,
    Volatility,
}

impl IndicatorName {
    pub const ALL: [IndicatorName; 8] = [
        IndicatorName::Close,
        IndicatorName::SmaShort,
        IndicatorName::SmaLong,
        IndicatorName::Rsi,
        IndicatorName::Volume,
        IndicatorName::VolumeMa,
        IndicatorName::VolumeRatio,
        IndicatorName::Volatility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorName::Close => "close",
            IndicatorName::SmaShort => "sma_short",
            IndicatorName::SmaLong => "sma_long",
            IndicatorName::Rsi => "rsi",
            IndicatorName::Volume => "volume",
            IndicatorName::VolumeMa => "volume_ma",
            IndicatorName::VolumeRatio => "volume_ratio",
            IndicatorName::Volatility => "volatility",
        }
    }

    /// Decimal places kept when the value is placed in a snapshot.
    pub fn precision(self) -> u32 {
        match self {
            IndicatorName::Close
            | IndicatorName::SmaShort
            | IndicatorName::SmaLong
            | IndicatorName::Volatility => 4,
            IndicatorName::Rsi
            | IndicatorName::Volume
            | IndicatorName::VolumeMa
            | IndicatorName::VolumeRatio => 2,
        }
    }
}

impl fmt::Display for IndicatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Flat `name -> value` mapping. Serializes as a JSON object keyed by the
/// snake_case indicator names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSnapshot {
    values: BTreeMap<IndicatorName, f64>,
}

impl IndicatorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value rounded to the indicator's precision.
    pub fn insert(&mut self, name: IndicatorName, value: f64) {
        self.values.insert(name, round_to(value, name.precision()));
    }

    pub fn get(&self, name: IndicatorName) -> Option<f64> {
        self.values.get(&name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorName, f64)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
