use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::shopify::{Branding, ThemeCategory};
use crate::wizard::{CheckoutLanguage, FormState};

const APP_DIR: &str = "store-creator";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Optional TOML file overriding the built-in field help
    pub field_help_path: PathBuf,
    /// Multiplier for simulated backend latency (0 = instant)
    pub latency_scale: f64,
    /// Checkout language preselected in a fresh wizard
    pub default_language: CheckoutLanguage,
    /// Theme category preselected in a fresh wizard
    pub default_theme: ThemeCategory,
    /// Branding applied during provisioning
    pub branding: Branding,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));
        let config_dir = dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            log_dir: data_dir.join("logs"),
            field_help_path: config_dir.join("field_help.toml"),
            latency_scale: 1.0,
            default_language: CheckoutLanguage::default(),
            default_theme: ThemeCategory::default(),
            branding: Branding::default(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Load from `path`, or from the default location. A missing file
    /// gives the defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config at {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Initial form values for a new wizard session
    pub fn form_defaults(&self) -> FormState {
        FormState {
            checkout_language: self.default_language,
            theme_category: self.default_theme,
            ..FormState::default()
        }
    }
}
