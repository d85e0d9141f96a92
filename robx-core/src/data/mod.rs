//! Market-data collaborators: fetch a `MarketSeries` for the signal engine.

pub mod csv_file;
pub mod provider;
pub mod yahoo;

pub use csv_file::CsvProvider;
pub use provider::{DataError, DataProvider};
pub use yahoo::YahooProvider;

use tracing::debug;

use crate::domain::MarketCandle;

/// Drop candles whose timestamp does not advance past the previous one.
///
/// Providers occasionally repeat the in-progress bar; the first occurrence wins.
pub(crate) fn drop_non_advancing(symbol: &str, candles: Vec<MarketCandle>) -> Vec<MarketCandle> {
    let total = candles.len();
    let mut kept: Vec<MarketCandle> = Vec::with_capacity(total);
    for candle in candles {
        match kept.last() {
            Some(prev) if candle.timestamp <= prev.timestamp => continue,
            _ => kept.push(candle),
        }
    }
    if kept.len() < total {
        debug!(symbol, dropped = total - kept.len(), "dropped non-advancing candles");
    }
    kept
}

/// Drop candles carrying NaN or infinite values.
pub(crate) fn drop_void(symbol: &str, candles: Vec<MarketCandle>) -> Vec<MarketCandle> {
    let total = candles.len();
    let kept: Vec<MarketCandle> = candles.into_iter().filter(|c| !c.is_void()).collect();
    if kept.len() < total {
        debug!(symbol, dropped = total - kept.len(), "dropped candles with non-finite values");
    }
    kept
}
