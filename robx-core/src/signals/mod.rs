//! Signal evaluation: parameters, scoring and the evaluation facade.

pub mod engine;
pub mod params;
pub mod scoring;
pub mod snapshot;

pub use engine::{evaluate, EvaluationResult, SignalEngine, INSUFFICIENT_DATA_SUMMARY};
pub use params::{ParamsError, SignalParameters};
pub use scoring::{LatestValues, ScoreBreakdown};
pub use snapshot::{IndicatorName, IndicatorSnapshot};
