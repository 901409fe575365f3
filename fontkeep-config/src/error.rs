//! Typed error variants for the fontkeep-config crate.
//!
//! Callers that only need a message can convert these into `anyhow::Error`;
//! callers that want to react to a specific failure can match on the variant.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The resource file is not valid JSON.
    #[error("JSON parse error in resource file: {0}")]
    Json(#[from] serde_json::Error),

    /// The settings file is not valid YAML.
    #[error("YAML parse error in settings file: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the offending entry and why it was rejected.
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
