//! Application configuration: TOML file plus environment overrides.
//!
//! ```toml
//! [signal]
//! short_window = 9
//! long_window = 21
//!
//! [symbols]
//! default_assets = ["PETR4.SA", "VALE3.SA"]
//! default_mini_indice = "WIN=F"
//! default_mini_dolar = "WDO=F"
//!
//! [http]
//! timeout_secs = 15
//! max_retries = 2
//! ```

use anyhow::{bail, Context, Result};
use robx_core::{InstrumentType, SignalParameters};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Symbol used for equities when no default asset is configured.
pub const FALLBACK_EQUITY_SYMBOL: &str = "PETR4.SA";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub signal: SignalParameters,
    pub symbols: SymbolsConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolsConfig {
    pub default_assets: Vec<String>,
    pub default_mini_indice: String,
    pub default_mini_dolar: String,
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            default_assets: vec![
                "PETR4.SA".to_string(),
                "VALE3.SA".to_string(),
                "BBDC4.SA".to_string(),
            ],
            default_mini_indice: "WIN=F".to_string(),
            default_mini_dolar: "WDO=F".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_retries: 2,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse config TOML")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Load the file (if any), then apply `ROBX_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            bail!("http.timeout_secs must be at least 1 (ROBX_HTTP_TIMEOUT_SECS overrides it)");
        }
        Ok(())
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup("ROBX_DEFAULT_ASSETS") {
            self.symbols.default_assets = parse_list(&raw);
        }
        if let Some(symbol) = lookup("ROBX_DEFAULT_MINI_INDICE") {
            self.symbols.default_mini_indice = symbol;
        }
        if let Some(symbol) = lookup("ROBX_DEFAULT_MINI_DOLAR") {
            self.symbols.default_mini_dolar = symbol;
        }
        if let Some(raw) = lookup("ROBX_HTTP_TIMEOUT_SECS") {
            self.http.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("ROBX_HTTP_TIMEOUT_SECS must be an integer, got '{raw}'"))?;
        }
        Ok(())
    }

    /// Pick the symbol to evaluate: an explicit one wins, otherwise the
    /// configured default for the instrument type.
    pub fn resolve_symbol(&self, instrument: InstrumentType, explicit: Option<&str>) -> String {
        if let Some(symbol) = explicit.filter(|s| !s.trim().is_empty()) {
            return symbol.trim().to_string();
        }
        match instrument {
            InstrumentType::MiniIndice => self.symbols.default_mini_indice.clone(),
            InstrumentType::MiniDolar => self.symbols.default_mini_dolar.clone(),
            InstrumentType::Equity => self
                .symbols
                .default_assets
                .first()
                .cloned()
                .unwrap_or_else(|| FALLBACK_EQUITY_SYMBOL.to_string()),
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.http.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn partial_signal_table() {
        let config = AppConfig::from_toml(
            r#"
            [signal]
            short_window = 9
            long_window = 21
            "#,
        )
        .unwrap();
        assert_eq!(config.signal.short_window, Some(9));
        assert_eq!(config.signal.long_window, Some(21));
        assert_eq!(config.signal.rsi_period, None);
        assert_eq!(config.symbols, SymbolsConfig::default());
    }

    #[test]
    fn negative_window_rejected() {
        assert!(AppConfig::from_toml("[signal]\nshort_window = -3\n").is_err());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robx.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 5\n").unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.max_retries, 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::from_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROBX_DEFAULT_ASSETS", " ITUB4.SA, ,ABEV3.SA "),
            ("ROBX_DEFAULT_MINI_DOLAR", "WDOJ25"),
            ("ROBX_HTTP_TIMEOUT_SECS", "30"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.symbols.default_assets, vec!["ITUB4.SA", "ABEV3.SA"]);
        assert_eq!(config.symbols.default_mini_dolar, "WDOJ25");
        assert_eq!(config.symbols.default_mini_indice, "WIN=F");
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn bad_timeout_env_is_an_error() {
        let mut config = AppConfig::default();
        let result = config.apply_env(|key| {
            (key == "ROBX_HTTP_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config
            .apply_env(|key| (key == "ROBX_HTTP_TIMEOUT_SECS").then(|| "0".to_string()))
            .unwrap();
        assert!(config.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn load_rejects_zero_timeout_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robx.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"), "{err}");
    }

    #[test]
    fn resolve_symbol_rules() {
        let config = AppConfig::default();
        assert_eq!(config.resolve_symbol(InstrumentType::Equity, Some("ITUB4.SA")), "ITUB4.SA");
        assert_eq!(config.resolve_symbol(InstrumentType::MiniIndice, None), "WIN=F");
        assert_eq!(config.resolve_symbol(InstrumentType::MiniDolar, Some("  ")), "WDO=F");
        assert_eq!(config.resolve_symbol(InstrumentType::Equity, None), "PETR4.SA");

        let mut no_assets = AppConfig::default();
        no_assets.symbols.default_assets.clear();
        assert_eq!(
            no_assets.resolve_symbol(InstrumentType::Equity, None),
            FALLBACK_EQUITY_SYMBOL
        );
    }
}
