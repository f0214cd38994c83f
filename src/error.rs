//! Error types for loading configuration files declared in configuration.

use thiserror::Error;

/// Errors raised while registering, building, or reloading configuration
#[derive(Debug, Error)]
pub enum ConfigFilesError {
    #[error("Unable to obtain a readable configuration snapshot: {0}")]
    ConfigurationUnavailable(#[source] config::ConfigError),

    #[error("No configuration files declared in section '{section}'")]
    MissingRequiredFiles { section: String },

    #[error("Invalid file list in section '{section}': {reason}")]
    InvalidFileList { section: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl ConfigFilesError {
    pub(crate) fn invalid_list(section: &str, reason: impl Into<String>) -> Self {
        ConfigFilesError::InvalidFileList {
            section: section.to_string(),
            reason: reason.into(),
        }
    }
}
