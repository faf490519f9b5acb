//! # Application Settings
//!
//! Store settings and the VAT rate table, loaded once at startup and
//! read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COMPTOIR_STORE_NAME, COMPTOIR_CURRENCY_SYMBOL, COMPTOIR_LOG        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $COMPTOIR_CONFIG, or the platform config dir:                      │
//! │     ~/.config/comptoir/comptoir.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     French VAT rates: 20 %, 10 %, 5.5 %, 2.1 %                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Épicerie du Port"
//! currency_symbol = "€"
//! default_vat_rate_id = "tva-20"
//! document_kind = "invoice"
//!
//! [[tax_rates]]
//! id = "tva-20"
//! rate = 20
//! code = "1"
//!
//! [[tax_rates]]
//! id = "tva-5.5"
//! rate = 5.5
//! code = "3"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use comptoir_core::types::{DocumentKind, Rate, TaxRate, TaxRateTable};
use comptoir_core::validation::validate_tax_rates;

use crate::error::ConfigError;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "COMPTOIR_CONFIG";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Store name printed on documents.
    pub store_name: String,

    /// Currency symbol appended to amounts.
    pub currency_symbol: String,

    /// Rate applied to catalog items created without one.
    pub default_vat_rate_id: String,

    /// Document kind new order sessions start as.
    pub document_kind: DocumentKind,

    /// `tracing` filter directive; `RUST_LOG` still wins.
    pub log_filter: Option<String>,

    /// The VAT rate table.
    pub tax_rates: TaxRateTable,
}

impl Default for AppConfig {
    /// Development defaults: French VAT rates, euro.
    fn default() -> Self {
        AppConfig {
            store_name: "Comptoir".to_string(),
            currency_symbol: "€".to_string(),
            default_vat_rate_id: "tva-20".to_string(),
            document_kind: DocumentKind::Invoice,
            log_filter: None,
            tax_rates: TaxRateTable::new(vec![
                TaxRate::new("tva-20", Rate::from_percentage(20.0), "1"),
                TaxRate::new("tva-10", Rate::from_percentage(10.0), "2"),
                TaxRate::new("tva-5.5", Rate::from_percentage(5.5), "3"),
                TaxRate::new("tva-2.1", Rate::from_percentage(2.1), "4"),
            ]),
        }
    }
}

/// Where the loaded settings came from.
///
/// Settings are loaded before logging is set up (the log filter is one of
/// them), so the caller logs this once the subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("defaults"),
        }
    }
}

impl AppConfig {
    /// Loads settings from the file named by `COMPTOIR_CONFIG`, else the
    /// platform config file, else defaults; then applies environment
    /// overrides and validates.
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);

        AppConfig::load_from(path, |key| std::env::var(key).ok())
    }

    /// Loads settings from `path` when it exists, else defaults; then
    /// applies overrides read through `lookup` and validates.
    pub fn load_from<F>(
        path: Option<PathBuf>,
        lookup: F,
    ) -> Result<(Self, ConfigSource), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, source) = match path {
            Some(path) if path.exists() => {
                let config = AppConfig::from_file(&path)?;
                (config, ConfigSource::File(path))
            }
            _ => (AppConfig::default(), ConfigSource::Defaults),
        };

        config.apply_overrides(lookup);
        config.validate()?;
        Ok((config, source))
    }

    /// Reads and parses a TOML settings file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Applies `COMPTOIR_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store_name) = lookup("COMPTOIR_STORE_NAME") {
            self.store_name = store_name;
        }
        if let Some(symbol) = lookup("COMPTOIR_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
        if let Some(filter) = lookup("COMPTOIR_LOG") {
            self.log_filter = Some(filter);
        }
    }

    /// Checks the tax rate table and the default rate reference.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tax_rates(self.tax_rates.as_slice())?;

        if self.tax_rates.find(&self.default_vat_rate_id).is_none() {
            return Err(ConfigError::UnknownDefaultRate(
                self.default_vat_rate_id.clone(),
            ));
        }
        Ok(())
    }
}

/// Platform config file location, e.g. `~/.config/comptoir/comptoir.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("fr", "comptoir", "comptoir")
        .map(|dirs| dirs.config_dir().join("comptoir.toml"))
}

// =============================================================================
// Unit Tests
// =============================================================================
