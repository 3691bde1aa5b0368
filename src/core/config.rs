use super::currency::CurrencyCode;
use super::error::FxError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Response shape spoken by the upstream rates provider.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// `<base>/<key>/latest/<BASE>` returning `conversion_rates`.
    ExchangeRateApi,
    /// `<base>/latest?base=..&symbols=..` returning `rates` or `data`.
    Generic,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub default_base: Option<String>,
    /// Forces a response shape instead of detecting it from the host name.
    #[serde(default)]
    pub provider: Option<ProviderKind>,
}

impl AppConfig {
    pub fn new(api_base_url: &str) -> Self {
        AppConfig {
            api_base_url: api_base_url.to_string(),
            api_key: None,
            default_base: None,
            provider: None,
        }
    }

    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Checks the fields the operations depend on. The base URL is parsed
    /// again, with the same rules, for every request.
    pub fn validate(&self) -> Result<(), FxError> {
        if self.api_base_url.trim().is_empty() {
            return Err(FxError::configuration("Missing apiBaseUrl in configuration"));
        }
        crate::providers::adapter::parse_base_url(&self.api_base_url)?;
        self.default_base_code()?;
        Ok(())
    }

    /// The configured default base currency, normalized.
    pub fn default_base_code(&self) -> Result<Option<CurrencyCode>, FxError> {
        self.default_base
            .as_deref()
            .map(|raw| {
                CurrencyCode::normalize(raw).map_err(|_| {
                    FxError::configuration(format!(
                        "defaultBase must be a 3-letter currency code, got '{raw}'"
                    ))
                })
            })
            .transpose()
    }

    /// The API key, with blank values treated as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
