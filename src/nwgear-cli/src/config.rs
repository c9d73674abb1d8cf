//! Configuration management for nwgear CLI

use anyhow::{Context, Result};
use nwgear::{ExtractorConfig, FetchConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: Option<String>,
    pub recipes: Option<PathBuf>,
    pub craft_mods: Option<PathBuf>,
    pub prices: Option<PathBuf>,
    pub price_url: Option<String>,
    pub render_url: Option<String>,
    pub fetch: FetchConfig,
    pub extractor: ExtractorConfig,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("nwgear");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Reject out-of-range fetch settings and broken extractor patterns
    pub fn validate(&self) -> Result<()> {
        self.fetch.validate().context("Invalid [fetch] settings")?;
        self.extractor
            .validate()
            .context("Invalid [extractor] settings")?;
        Ok(())
    }
}
