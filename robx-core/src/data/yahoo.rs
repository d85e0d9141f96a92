//! Yahoo Finance data provider.
//!
//! Fetches OHLCV candles from Yahoo's v8 chart API using the timeframe's
//! `range`/`interval` pair. Retries connection failures, 429 and 5xx
//! responses with exponential backoff.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. The CSV provider is the offline fallback.

use chrono::DateTime;
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{drop_non_advancing, drop_void};
use super::provider::{DataError, DataProvider};
use crate::domain::{MarketCandle, MarketSeries, Timeframe};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Longest wait honoured from a `Retry-After` header.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Yahoo Finance data provider.
///
/// Owns its HTTP client; construct one per collaborator lifetime.
#[derive(Debug, Clone)]
pub struct YahooProvider {
    client: Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    /// Wrap an already configured client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        }
    }

    /// Build a client with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::new(client))
    }

    /// Point the provider at a different host (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retries(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.base_delay = base_delay;
        self
    }

    /// Build the chart API URL for a symbol and timeframe.
    fn chart_url(&self, symbol: &str, timeframe: Timeframe) -> Result<Url, DataError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DataError::Other(format!("invalid base URL '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| DataError::Other(format!("base URL '{}' cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("range", timeframe.yahoo_range())
            .append_pair("interval", timeframe.as_str());
        Ok(url)
    }

    /// Parse the chart API response into a series.
    ///
    /// Rows with any missing OHLC value are skipped; a missing volume is 0.
    fn parse_response(
        symbol: &str,
        timeframe: Timeframe,
        resp: ChartResponse,
    ) -> Result<MarketSeries, DataError> {
        if let Some(err) = resp.chart.error {
            return Err(if err.code == "Not Found" {
                DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                }
            } else {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            });
        }

        let data = resp
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| DataError::NoData {
                symbol: symbol.to_string(),
            })?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let timestamps = data.timestamp.unwrap_or_default();
        let mut candles = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            if ts == 0 || i >= quote.close.len() {
                continue;
            }
            let (Some(open), Some(high), Some(low), Some(close)) = (
                value_at(&quote.open, i),
                value_at(&quote.high, i),
                value_at(&quote.low, i),
                value_at(&quote.close, i),
            ) else {
                continue;
            };
            let timestamp = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
            })?;

            candles.push(MarketCandle {
                timestamp,
                open,
                high,
                low,
                close,
                volume: value_at(&quote.volume, i).unwrap_or(0.0),
            });
        }

        let resolved = data
            .meta
            .and_then(|m| m.symbol)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| symbol.to_string());

        let candles = drop_void(&resolved, candles);
        if candles.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }
        let candles = drop_non_advancing(&resolved, candles);

        Ok(MarketSeries::new(resolved, timeframe, candles)?)
    }

    /// Wait before retry number `attempt` (1-based): exponential backoff, or
    /// the server's `Retry-After` when longer, capped at [`MAX_RETRY_AFTER`].
    fn retry_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self.base_delay * 2u32.pow(attempt.saturating_sub(1));
        match retry_after {
            Some(requested) => requested.min(MAX_RETRY_AFTER).max(backoff),
            None => backoff,
        }
    }

    /// Execute the request with retry on transient failures.
    fn fetch_with_retry(&self, symbol: &str, timeframe: Timeframe) -> Result<MarketSeries, DataError> {
        let url = self.chart_url(symbol, timeframe)?;
        let mut last_error = None;
        let mut retry_after = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_delay(attempt, retry_after.take());
                warn!(symbol, attempt, delay_ms = delay.as_millis() as u64, "retrying chart request");
                std::thread::sleep(delay);
            }

            debug!(%url, "requesting chart");
            let resp = match self.client.get(url.clone()).header("Accept", "application/json").send() {
                Ok(resp) => resp,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                    continue;
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            };

            let status = resp.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                let secs = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after);
                retry_after = secs.map(Duration::from_secs);
                last_error = Some(DataError::RateLimited {
                    retry_after_secs: secs,
                });
                continue;
            }
            if status == StatusCode::NOT_FOUND {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                });
            }
            if status.is_server_error() {
                last_error = Some(DataError::HttpStatus {
                    status: status.as_u16(),
                    symbol: symbol.to_string(),
                });
                continue;
            }
            if !status.is_success() {
                return Err(DataError::HttpStatus {
                    status: status.as_u16(),
                    symbol: symbol.to_string(),
                });
            }

            let chart: ChartResponse = resp.json().map_err(|e| {
                DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
            })?;
            return Self::parse_response(symbol, timeframe, chart);
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

/// `Retry-After` in delta-seconds form; HTTP-date values are ignored.
fn parse_retry_after(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn value_at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str, timeframe: Timeframe) -> Result<MarketSeries, DataError> {
        let series = self.fetch_with_retry(symbol, timeframe)?;
        debug!(
            symbol = %series.symbol,
            timeframe = %timeframe,
            candles = series.len(),
            "fetched chart"
        );
        Ok(series)
    }
}
