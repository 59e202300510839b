//! Server configuration.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pledge_core::{CoreResult, Currency, FxTable};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Storage path
    #[serde(default = "default_storage_path")]
    pub storage_path: String,

    /// Largest accepted upload, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Origins allowed by CORS; `"*"` allows any
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Currency for rows that carry none
    #[serde(default)]
    pub default_currency: Currency,

    /// USD conversion rates keyed by currency code
    #[serde(default = "default_fx_rates")]
    pub fx_rates: BTreeMap<String, Decimal>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_storage_path() -> String {
    "./data/pledge.redb".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_fx_rates() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("GBP".to_string(), Decimal::new(125, 2)),
        ("USD".to_string(), Decimal::ONE),
    ])
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage_path: default_storage_path(),
            max_upload_bytes: default_max_upload_bytes(),
            cors_origins: default_cors_origins(),
            default_currency: Currency::default(),
            fx_rates: default_fx_rates(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        toml::from_str(content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Builds the FX table, rejecting unknown currency codes and rates
    /// that are not positive.
    pub fn fx_table(&self) -> CoreResult<FxTable> {
        self.fx_rates
            .iter()
            .try_fold(FxTable::empty(), |table, (code, rate)| {
                table.try_with_rate(Currency::from_str(code)?, *rate)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_upload_bytes, 10_485_760);
        assert_eq!(config.default_currency, Currency::USD);
        assert_eq!(config.fx_table().unwrap(), FxTable::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            port = 9000
            default_currency = "GBP"

            [fx_rates]
            GBP = 1.3
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.default_currency, Currency::GBP);

        let fx = config.fx_table().unwrap();
        assert_eq!(fx.to_usd(dec!(10), Currency::GBP).unwrap(), dec!(13));
        // USD absent from the table converts at par
        assert_eq!(fx.to_usd(dec!(10), Currency::USD).unwrap(), dec!(10));
    }

    #[test]
    fn test_unknown_fx_currency() {
        let config = ServerConfig::from_toml("[fx_rates]\nEUR = 1.1\n").unwrap();
        assert!(config.fx_table().is_err());
    }

    #[test]
    fn test_non_positive_fx_rate_rejected() {
        for rates in ["GBP = 0", "GBP = -1.25", "USD = 0.0"] {
            let config = ServerConfig::from_toml(&format!("[fx_rates]\n{rates}\n")).unwrap();
            let err = config.fx_table().unwrap_err();
            assert!(matches!(err, pledge_core::CoreError::InvalidFxRate { .. }), "{rates}");
        }
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = ServerConfig::from_toml(include_str!("../../../config/pledge.toml")).unwrap();
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.fx_table().unwrap(), FxTable::default());
    }
}
