//! Configuration management for flowmeta
//!
//! Loads the TOML configuration, applies `FLOWMETA_SECTION__KEY` environment
//! overrides and validates the result.

use crate::error::{FlowmetaError, Result};
use crate::resolver::ResolveOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    pub logging: LoggingConfig,
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub resolve: ResolveOptions,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing-subscriber filter directive, overridden by RUST_LOG
    pub filter: String,
}

/// Inventory snapshot location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub path: PathBuf,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FlowmetaError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FlowmetaError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| FlowmetaError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: FLOWMETA_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("FLOWMETA_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "LOGGING__FILTER" => {
                self.logging.filter = value.to_string();
            }
            "INVENTORY__PATH" => {
                self.inventory.path = PathBuf::from(value);
            }
            "RESOLVE__L3_END_BY_TTL" => {
                self.resolve.l3_end_by_ttl = parse_bool(path, value)?;
            }
            "RESOLVE__L3_END_BY_IP" => {
                self.resolve.l3_end_by_ip = parse_bool(path, value)?;
            }
            "RESOLVE__L3_END_BY_MAC" => {
                self.resolve.l3_end_by_mac = parse_bool(path, value)?;
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            FlowmetaError::Config("Cannot determine config directory".to_string())
        })?;

        Ok(config_dir.join("flowmeta").join("config.toml"))
    }
}

fn parse_bool(path: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| FlowmetaError::InvalidConfigValue {
        path: path.to_string(),
        message: format!("Cannot parse '{}' as boolean", value),
    })
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| FlowmetaError::Config("Invalid path encoding".to_string()))?;

    if let Some(stripped) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| {
            FlowmetaError::Config("Cannot determine home directory".to_string())
        })?;
        Ok(home.join(stripped))
    } else {
        Ok(path.to_path_buf())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            logging: LoggingConfig {
                filter: "flowmeta=info".to_string(),
            },
            inventory: InventoryConfig {
                path: PathBuf::from("~/.config/flowmeta/inventory.json"),
            },
            resolve: ResolveOptions::default(),
        }
    }
}
