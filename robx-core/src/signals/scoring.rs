//! Scoring: reduce the latest indicator values to a bounded score and a decision.
//!
//! The score starts at a neutral 50 on a 0–100 scale. Four independent rules
//! nudge it up or down (trend, momentum, volume, volatility), the total is
//! clamped, and fixed bands map it to buy / sell / hold. Confidence is the
//! same quantity re-expressed as a fraction.

use crate::domain::Recommendation;
use crate::signals::params::SignalParameters;

pub const BASELINE_SCORE: f64 = 50.0;
pub const TREND_WEIGHT: f64 = 20.0;
pub const MOMENTUM_WEIGHT: f64 = 15.0;
pub const VOLUME_WEIGHT: f64 = 5.0;
pub const VOLATILITY_WEIGHT: f64 = 5.0;

pub const VOLUME_SURGE_RATIO: f64 = 1.2;
pub const VOLUME_DRY_UP_RATIO: f64 = 0.8;
pub const CALM_VOLATILITY: f64 = 0.02;
pub const ERRATIC_VOLATILITY: f64 = 0.06;

pub const BUY_THRESHOLD: f64 = 60.0;
pub const SELL_THRESHOLD: f64 = 40.0;

/// Latest (last-index) value of every input the score depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestValues {
    pub close: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub rsi: f64,
    pub volume: f64,
    pub volume_ma: f64,
    pub volatility: f64,
}

impl LatestValues {
    /// Latest volume over its moving average; 1.0 when the average is not positive.
    pub fn volume_ratio(&self) -> f64 {
        if self.volume_ma > 0.0 {
            self.volume / self.volume_ma
        } else {
            1.0
        }
    }
}

/// Signed contribution of each rule to the final score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub trend: f64,
    pub momentum: f64,
    pub volume: f64,
    pub volatility: f64,
}

impl ScoreBreakdown {
    pub fn compute(latest: &LatestValues, params: &SignalParameters) -> Self {
        let trend = if latest.sma_short > latest.sma_long && latest.close > latest.sma_short {
            TREND_WEIGHT
        } else if latest.sma_short < latest.sma_long && latest.close < latest.sma_short {
            -TREND_WEIGHT
        } else {
            0.0
        };

        let momentum = if latest.rsi <= f64::from(params.rsi_oversold()) {
            MOMENTUM_WEIGHT
        } else if latest.rsi >= f64::from(params.rsi_overbought()) {
            -MOMENTUM_WEIGHT
        } else {
            0.0
        };

        let ratio = latest.volume_ratio();
        let volume = if ratio > VOLUME_SURGE_RATIO {
            VOLUME_WEIGHT
        } else if ratio < VOLUME_DRY_UP_RATIO {
            -VOLUME_WEIGHT
        } else {
            0.0
        };

        // Zero volatility means "not enough history", not "perfectly calm"
        let volatility = if latest.volatility > 0.0 {
            if latest.volatility < CALM_VOLATILITY {
                VOLATILITY_WEIGHT
            } else if latest.volatility > ERRATIC_VOLATILITY {
                -VOLATILITY_WEIGHT
            } else {
                0.0
            }
        } else {
            0.0
        };

        Self {
            trend,
            momentum,
            volume,
            volatility,
        }
    }

    /// Baseline plus every contribution, clamped to [0, 100].
    pub fn total(&self) -> f64 {
        let raw = BASELINE_SCORE + self.trend + self.momentum + self.volume + self.volatility;
        raw.clamp(0.0, 100.0)
    }
}

/// Clamped score in [0, 100] for the given latest values.
pub fn score(latest: &LatestValues, params: &SignalParameters) -> f64 {
    ScoreBreakdown::compute(latest, params).total()
}

/// Map a score to a decision. Scores strictly between 40 and 60 hold.
pub fn recommendation_for(score: f64) -> Recommendation {
    if score >= BUY_THRESHOLD {
        Recommendation::Buy
    } else if score <= SELL_THRESHOLD {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

/// The score re-expressed as a fraction in [0, 1].
pub fn confidence(score: f64) -> f64 {
    score.clamp(0.0, 100.0).round() / 100.0
}

/// Human-readable rationale. Purely descriptive.
pub fn summary(recommendation: Recommendation, rsi: f64, short_window: u32, long_window: u32) -> String {
    let phrase = match recommendation {
        Recommendation::Buy => "Buying pressure dominant",
        Recommendation::Sell => "Selling pressure dominant",
        Recommendation::Hold => "Neutral setup, wait for confirmation",
    };
    format!("{phrase}; RSI at {rsi:.1}; SMAs {short_window}/{long_window} aligned")
}
