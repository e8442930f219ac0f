use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flowmeta
#[derive(Error, Debug)]
pub enum FlowmetaError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Prefix length outside the IPv4 address width
    #[error("Invalid prefix length {prefix}: must be within 0..=32")]
    InvalidPrefixLength { prefix: u32 },

    /// Unparsable hardware address
    #[error("Invalid MAC address: {0}")]
    InvalidMac(String),

    /// Raw tap value at or above the upper bound
    #[error("Invalid tap type: {0}")]
    InvalidTapType(u8),

    /// Inventory snapshot errors
    #[error("Inventory error: {0}")]
    Inventory(String),

    /// Inventory snapshot failed validation
    #[error("Inventory validation failed: {errors:?}")]
    InventoryValidation { errors: Vec<ValidationError> },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Validation error for a single configuration key or inventory field
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for flowmeta operations
pub type Result<T> = std::result::Result<T, FlowmetaError>;
