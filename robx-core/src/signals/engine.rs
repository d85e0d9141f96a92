//! Evaluation facade: series + parameters in, recommendation out.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::{MarketSeries, Recommendation};
use crate::indicators::{Indicator, Rsi, Sma, Volatility};
use crate::signals::params::SignalParameters;
use crate::signals::scoring::{self, LatestValues, ScoreBreakdown};
use crate::signals::snapshot::{IndicatorName, IndicatorSnapshot};

/// Summary returned when the series has no candles.
pub const INSUFFICIENT_DATA_SUMMARY: &str = "Insufficient data";

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub summary: String,
    pub indicators: IndicatorSnapshot,
}

impl EvaluationResult {
    /// Hold with zero confidence and no indicators.
    pub fn insufficient_data() -> Self {
        Self {
            recommendation: Recommendation::Hold,
            confidence: 0.0,
            summary: INSUFFICIENT_DATA_SUMMARY.to_string(),
            indicators: IndicatorSnapshot::new(),
        }
    }
}

/// Stateless signal evaluator.
///
/// Holds no data; each call allocates its own indicator series, so one engine
/// can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEngine;

impl SignalEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the latest state of `series`.
    ///
    /// Never fails: an empty series yields [`EvaluationResult::insufficient_data`].
    pub fn evaluate(&self, series: &MarketSeries, params: &SignalParameters) -> EvaluationResult {
        let params = params.with_defaults();
        if series.is_empty() {
            debug!(symbol = %series.symbol, "no candles, returning insufficient-data hold");
            return EvaluationResult::insufficient_data();
        }

        let closes = series.closes();
        let volumes = series.volumes();

        let sma_short = Sma::new(params.short_window() as usize);
        let sma_long = Sma::new(params.long_window() as usize);
        let rsi = Rsi::new(params.rsi_period() as usize);
        let volume_ma = Sma::new(params.volume_window() as usize);
        let volatility = Volatility::new(params.volatility_window() as usize);

        let longest = [
            sma_short.lookback(),
            sma_long.lookback(),
            rsi.lookback(),
            volume_ma.lookback(),
            volatility.lookback(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        if closes.len() <= longest {
            debug!(
                symbol = %series.symbol,
                candles = closes.len(),
                required = longest + 1,
                "series shorter than the longest indicator lookback, warmup values in use"
            );
        }

        let latest = LatestValues {
            close: last(&closes),
            sma_short: last(&sma_short.compute(&closes)),
            sma_long: last(&sma_long.compute(&closes)),
            rsi: last(&rsi.compute(&closes)),
            volume: last(&volumes),
            volume_ma: last(&volume_ma.compute(&volumes)),
            volatility: last(&volatility.compute(&closes)),
        };
        trace!(?latest, "latest indicator values");

        let breakdown = ScoreBreakdown::compute(&latest, &params);
        let score = breakdown.total();
        let recommendation = scoring::recommendation_for(score);

        debug!(
            symbol = %series.symbol,
            timeframe = %series.timeframe,
            candles = closes.len(),
            trend = breakdown.trend,
            momentum = breakdown.momentum,
            volume = breakdown.volume,
            volatility = breakdown.volatility,
            score,
            %recommendation,
            "signal evaluated"
        );

        EvaluationResult {
            recommendation,
            confidence: scoring::confidence(score),
            summary: scoring::summary(
                recommendation,
                latest.rsi,
                params.short_window(),
                params.long_window(),
            ),
            indicators: snapshot(&latest),
        }
    }
}

/// Evaluate with a throwaway [`SignalEngine`].
pub fn evaluate(series: &MarketSeries, params: &SignalParameters) -> EvaluationResult {
    SignalEngine::new().evaluate(series, params)
}

/// Last element; callers guarantee non-empty input.
fn last(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(0.0)
}

fn snapshot(latest: &LatestValues) -> IndicatorSnapshot {
    let mut snap = IndicatorSnapshot::new();
    snap.insert(IndicatorName::Close, latest.close);
    snap.insert(IndicatorName::SmaShort, latest.sma_short);
    snap.insert(IndicatorName::SmaLong, latest.sma_long);
    snap.insert(IndicatorName::Rsi, latest.rsi);
    snap.insert(IndicatorName::Volume, latest.volume);
    snap.insert(IndicatorName::VolumeMa, latest.volume_ma);
    snap.insert(IndicatorName::VolumeRatio, latest.volume_ratio());
    snap.insert(IndicatorName::Volatility, latest.volatility);
    snap
}
