use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const ACCESS_KEY_ENV: &str = "CURRENCYLAYER_ACCESS_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogProviderConfig {
    pub base_url: String,
}

impl Default for CatalogProviderConfig {
    fn default() -> Self {
        CatalogProviderConfig {
            base_url: "https://services.odata.org/V3/Northwind/Northwind.svc".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CountriesProviderConfig {
    pub base_url: String,
}

impl Default for CountriesProviderConfig {
    fn default() -> Self {
        CountriesProviderConfig {
            base_url: "https://restcountries.com/v2".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub access_key: Option<String>,
}

impl Default for ExchangeProviderConfig {
    fn default() -> Self {
        ExchangeProviderConfig {
            base_url: "http://api.currencylayer.com".to_string(),
            access_key: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub catalog: CatalogProviderConfig,
    #[serde(default)]
    pub countries: CountriesProviderConfig,
    #[serde(default)]
    pub exchange: ExchangeProviderConfig,
}

fn default_base_currency() -> String {
    crate::core::engine::DEFAULT_BASE_CURRENCY.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            base_currency: default_base_currency(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, falling back to built-in
    /// defaults when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "catalog-report", "catalog-report")
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

    /// Picks the exchange rate access key: an explicit override first, then
    /// the environment, then the config file. Blank values are ignored.
    pub fn resolve_access_key(&self, cli_override: Option<&str>) -> Option<String> {
        let from_env = std::env::var(ACCESS_KEY_ENV).ok();
        [
            cli_override.map(str::to_string),
            from_env,
            self.providers.exchange.access_key.clone(),
        ]
        .into_iter()
        .flatten()
        .find(|key| !key.trim().is_empty())
    }
}
