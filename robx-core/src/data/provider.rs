//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV
//! files) so the CLI can swap implementations and tests can feed fixtures.

use thiserror::Error;

use crate::domain::{DomainError, MarketSeries, Timeframe};

/// Structured error types for data operations.
///
/// All fetch failures surface here, before the signal engine is invoked.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("HTTP {status} for {symbol}")]
    HttpStatus { status: u16, symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no market data available for {symbol}")]
    NoData { symbol: String },

    #[error("invalid record in {source_name}: {reason}")]
    InvalidRecord { source_name: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market-data providers.
///
/// Implementations own whatever client or handle they need; nothing is
/// shared process-wide.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the candle history for `symbol` at the given timeframe.
    fn fetch(&self, symbol: &str, timeframe: Timeframe) -> Result<MarketSeries, DataError>;
}
