//! File-based configuration for the record-store connection.

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration loading failed: {0}")]
    Load(#[from] ConfigError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub store: StoreSettings,
}

/// Connection details for the spreadsheet row-store API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_history_sheet")]
    pub history_sheet: String,
    #[serde(default = "default_items_sheet")]
    pub items_sheet: String,
    #[serde(default = "default_vendors_sheet")]
    pub vendors_sheet: String,
}

impl Settings {
    /// Load from the given path, or from `config.toml` when none is
    /// given. With no explicit path, a missing or unreadable file
    /// falls back to defaults instead of failing.
    pub fn load(config_path: &Option<String>) -> Result<Self, SettingsError> {
        match Self::load_from_file(config_path) {
            Ok(settings) => Ok(settings),
            Err(err) if config_path.is_none() => {
                warn!("could not read config file: {err}; using default configuration");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    fn load_from_file(config_path: &Option<String>) -> Result<Self, SettingsError> {
        let path = config_path.as_deref().unwrap_or("config.toml");

        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                base_url: "http://localhost:8787/v1/".to_string(),
                api_token: None,
                history_sheet: default_history_sheet(),
                items_sheet: default_items_sheet(),
                vendors_sheet: default_vendors_sheet(),
            },
        }
    }
}

fn default_history_sheet() -> String {
    "shipping_history".to_string()
}

fn default_items_sheet() -> String {
    "items".to_string()
}

fn default_vendors_sheet() -> String {
    "vendors".to_string()
}
