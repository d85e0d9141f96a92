//! Serialized signal output.

use chrono::{DateTime, Utc};
use robx_core::signals::{IndicatorName, IndicatorSnapshot};
use robx_core::{EvaluationResult, InstrumentType, Recommendation, SignalParameters, Timeframe};
use serde::{Deserialize, Serialize};

/// One evaluated signal, with the context needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub recommendation: Recommendation,
    pub confidence: f64,
    pub summary: String,
    pub symbol: String,
    pub instrument_type: InstrumentType,
    pub timeframe: Timeframe,
    pub parameters: SignalParameters,
    pub indicators: IndicatorSnapshot,
    pub created_at: DateTime<Utc>,
}

impl SignalReport {
    pub fn new(
        symbol: impl Into<String>,
        instrument_type: InstrumentType,
        timeframe: Timeframe,
        parameters: &SignalParameters,
        result: EvaluationResult,
    ) -> Self {
        Self {
            recommendation: result.recommendation,
            confidence: result.confidence,
            summary: result.summary,
            symbol: symbol.into(),
            instrument_type,
            timeframe,
            parameters: parameters.with_defaults(),
            indicators: result.indicators,
            created_at: Utc::now(),
        }
    }

    /// One fixed-width row for the scan table.
    pub fn table_row(&self) -> String {
        let rsi = self
            .indicators
            .get(IndicatorName::Rsi)
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{:<12} {:<5} {:>5.2} {:>6}  {}",
            self.symbol, self.recommendation, self.confidence, rsi, self.summary
        )
    }
}

pub fn table_header() -> String {
    format!(
        "{:<12} {:<5} {:>5} {:>6}  {}",
        "SYMBOL", "REC", "CONF", "RSI", "SUMMARY"
    )
}
