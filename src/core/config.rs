use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Provider API key. The public latest-rates endpoint is unauthenticated,
    /// so the key is held but not sent; `EXCHANGE_API_KEY` in the environment
    /// takes effect when this is unset.
    pub api_key: Option<String>,
    /// Base currency for the currency listing and the sample run.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            api_key: None,
            currency: default_currency(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the platform config directory, or falls back to
    /// defaults when no file has been written yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxconv")
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
}
