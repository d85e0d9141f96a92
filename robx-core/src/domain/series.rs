//! MarketSeries: symbol, timeframe and an ordered candle history.

use serde::{Deserialize, Serialize};

use super::{DomainError, MarketCandle, Timeframe};

/// Ordered candle history for one symbol.
///
/// Candles are strictly increasing by timestamp. The series may be empty;
/// evaluation treats that as insufficient data rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedSeries")]
pub struct MarketSeries {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub candles: Vec<MarketCandle>,
}

/// Wire form of [`MarketSeries`]; deserialized series pass through `validate`.
#[derive(Deserialize)]
struct UncheckedSeries {
    symbol: String,
    timeframe: Timeframe,
    candles: Vec<MarketCandle>,
}

impl TryFrom<UncheckedSeries> for MarketSeries {
    type Error = DomainError;

    fn try_from(raw: UncheckedSeries) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.timeframe, raw.candles)
    }
}

impl MarketSeries {
    /// Build a series, rejecting duplicate or out-of-order timestamps.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        candles: Vec<MarketCandle>,
    ) -> Result<Self, DomainError> {
        let series = Self {
            symbol: symbol.into(),
            timeframe,
            candles,
        };
        series.validate()?;
        Ok(series)
    }

    /// Check the ordering invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (i, pair) in self.candles.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(DomainError::NonMonotonicTimestamps {
                    symbol: self.symbol.clone(),
                    index: i + 1,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&MarketCandle> {
        self.candles.last()
    }

    /// Close prices aligned with candle order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Volumes aligned with candle order.
    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}
