//! ROBX Core: signal evaluation for OHLCV price series.
//!
//! This crate contains:
//! - Domain types (candles, series, timeframes, recommendations)
//! - Indicator library (SMA, RSI, rolling volatility)
//! - Scoring and the evaluation facade that turns a series into a
//!   buy / sell / hold recommendation with a confidence
//! - Market-data providers (Yahoo Finance, CSV files) that supply the series
//!
//! Evaluation is a pure, synchronous function of its inputs. It performs no
//! I/O and never fails; all fetch errors surface from the `data` module first.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod signals;

pub use domain::{InstrumentType, MarketCandle, MarketSeries, Recommendation, Timeframe};
pub use signals::{evaluate, EvaluationResult, SignalEngine, SignalParameters};
