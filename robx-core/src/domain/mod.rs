//! Domain types: candles, series, timeframes, recommendations.

pub mod candle;
pub mod instrument;
pub mod recommendation;
pub mod series;
pub mod timeframe;

pub use candle::MarketCandle;
pub use instrument::InstrumentType;
pub use recommendation::Recommendation;
pub use series::MarketSeries;
pub use timeframe::Timeframe;

use thiserror::Error;

/// Errors raised while building domain values from external input.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("unsupported timeframe '{0}' (expected one of 1m, 5m, 15m, 1h, 1d, 1wk, 1mo)")]
    UnsupportedTimeframe(String),

    #[error("unknown instrument type '{0}' (expected equity, mini_indice or mini_dolar)")]
    UnknownInstrument(String),

    #[error("{symbol}: candle timestamps must be strictly increasing (violated at index {index})")]
    NonMonotonicTimestamps { symbol: String, index: usize },
}
