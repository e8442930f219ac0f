use crate::config::Config;
use crate::error::{FlowmetaError, Result, ValidationError};
use tracing_subscriber::EnvFilter;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_logging(config, &mut errors);
        Self::validate_inventory(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FlowmetaError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_logging(config: &Config, errors: &mut Vec<ValidationError>) {
        let filter = &config.logging.filter;
        if filter.is_empty() {
            errors.push(ValidationError::new(
                "logging.filter",
                "Log filter cannot be empty",
            ));
        } else if let Err(e) = EnvFilter::try_new(filter) {
            errors.push(ValidationError::new(
                "logging.filter",
                format!("Invalid log filter '{}': {}", filter, e),
            ));
        }
    }

    fn validate_inventory(config: &Config, errors: &mut Vec<ValidationError>) {
        // Existence is checked when the snapshot is loaded; the file may be
        // written by the sync process after the config.
        if config.inventory.path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "inventory.path",
                "Inventory path cannot be empty",
            ));
        }
    }
}
