//! Instrument categories a signal can be requested for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Category of the traded instrument.
///
/// Mini index and mini dollar futures have a rolling front-month ticker, so
/// callers usually resolve them to a configured continuous symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentType {
    #[default]
    Equity,
    MiniIndice,
    MiniDolar,
}

impl InstrumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            InstrumentType::Equity => "equity",
            InstrumentType::MiniIndice => "mini_indice",
            InstrumentType::MiniDolar => "mini_dolar",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for InstrumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equity" => Ok(InstrumentType::Equity),
            "mini_indice" => Ok(InstrumentType::MiniIndice),
            "mini_dolar" => Ok(InstrumentType::MiniDolar),
            other => Err(DomainError::UnknownInstrument(other.to_string())),
        }
    }
}
