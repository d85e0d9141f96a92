//! CSV data provider for offline evaluation.
//!
//! Reads `<dir>/<SYMBOL>.csv` with the header
//! `timestamp,open,high,low,close,volume`. Timestamps may be RFC 3339,
//! unix seconds, or a plain `YYYY-MM-DD` date (midnight UTC). An empty
//! volume cell is read as 0. Rows may appear in any order; they are sorted
//! by timestamp and rows with NaN or infinite values are skipped.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{drop_non_advancing, drop_void};
use super::provider::{DataError, DataProvider};
use crate::domain::{MarketCandle, MarketSeries, Timeframe};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
}

/// Loads candle files from a directory.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    /// Read every candle from `path`, in file order.
    pub fn read_candles(path: &Path) -> Result<Vec<MarketCandle>, DataError> {
        let mut reader = csv::Reader::from_path(path)?;
        let source_name = path.display().to_string();
        let mut candles = Vec::new();

        for (line, record) in reader.deserialize::<CsvRecord>().enumerate() {
            let record = record?;
            let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| DataError::InvalidRecord {
                source_name: source_name.clone(),
                reason: format!("row {}: unparseable timestamp '{}'", line + 1, record.timestamp),
            })?;
            candles.push(MarketCandle {
                timestamp,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume.unwrap_or(0.0),
            });
        }

        Ok(candles)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, symbol: &str, timeframe: Timeframe) -> Result<MarketSeries, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let mut candles = drop_void(symbol, Self::read_candles(&path)?);
        if candles.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }
        // Stable sort: of two rows with the same timestamp, the earlier one in the file wins
        candles.sort_by_key(|c| c.timestamp);
        let candles = drop_non_advancing(symbol, candles);
        Ok(MarketSeries::new(symbol, timeframe, candles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parse_timestamp_formats() {
        let rfc = parse_timestamp("2024-01-02T10:00:00-03:00").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-01-02T13:00:00+00:00");
        assert_eq!(parse_timestamp("1704196800").unwrap().timestamp(), 1704196800);
        assert_eq!(
            parse_timestamp("2024-01-02").unwrap().to_rfc3339(),
            "2024-01-02T00:00:00+00:00"
        );
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn fetch_reads_symbol_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("BBDC4.SA.csv"),
            "timestamp,open,high,low,close,volume\n\
             2024-01-02,14.0,14.5,13.9,14.2,1000\n\
             2024-01-03,14.2,14.8,14.1,14.7,\n",
        )
        .unwrap();

        let provider = CsvProvider::new(dir.path());
        let series = provider.fetch("BBDC4.SA", Timeframe::OneDay).unwrap();
        assert_eq!(series.symbol, "BBDC4.SA");
        assert_eq!(series.closes(), vec![14.2, 14.7]);
        assert_eq!(series.volumes(), vec![1000.0, 0.0]);
    }

    #[test]
    fn nan_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ITUB4.SA.csv"),
            "timestamp,open,high,low,close,volume\n\
             2024-01-02,30.0,30.5,29.9,30.2,1000\n\
             2024-01-03,30.2,30.8,30.1,NaN,1100\n\
             2024-01-04,30.4,30.9,30.3,30.6,inf\n\
             2024-01-05,30.6,31.0,30.5,30.9,1200\n",
        )
        .unwrap();

        let series = CsvProvider::new(dir.path())
            .fetch("ITUB4.SA", Timeframe::OneDay)
            .unwrap();
        assert_eq!(series.closes(), vec![30.2, 30.9]);
        assert!(series.candles.iter().all(|c| !c.is_void()));
    }

    #[test]
    fn only_void_rows_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("X.csv"),
            "timestamp,open,high,low,close,volume\n2024-01-02,NaN,1,1,1,1\n",
        )
        .unwrap();
        let err = CsvProvider::new(dir.path()).fetch("X", Timeframe::OneDay).unwrap_err();
        assert!(matches!(err, DataError::NoData { .. }));
    }

    #[test]
    fn newest_first_file_is_reordered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ABEV3.SA.csv"),
            "timestamp,open,high,low,close,volume\n\
             2024-01-04,12.4,12.6,12.3,12.5,900\n\
             2024-01-03,12.2,12.5,12.1,12.4,800\n\
             2024-01-03,99.0,99.0,99.0,99.0,1\n\
             2024-01-02,12.0,12.3,11.9,12.2,700\n",
        )
        .unwrap();

        let series = CsvProvider::new(dir.path())
            .fetch("ABEV3.SA", Timeframe::OneDay)
            .unwrap();
        assert_eq!(series.closes(), vec![12.2, 12.4, 12.5]);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn unreadable_file_surfaces_as_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvProvider::read_candles(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn missing_file_is_symbol_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvProvider::new(dir.path())
            .fetch("NOPE", Timeframe::OneDay)
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn bad_timestamp_is_invalid_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("X.csv"),
            "timestamp,open,high,low,close,volume\nsoon,1,1,1,1,1\n",
        )
        .unwrap();
        let err = CsvProvider::new(dir.path()).fetch("X", Timeframe::OneDay).unwrap_err();
        assert!(matches!(err, DataError::InvalidRecord { .. }));
    }
}
