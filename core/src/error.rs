//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a page configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML")]
    ParseToml(#[from] toml::de::Error),

    #[error("invalid arc radius {radius}: must be finite and positive")]
    InvalidRadius { radius: f64 },

    #[error("tick interval must be at least 1 ms")]
    InvalidInterval,

    #[error("marker class must be a non-empty CSS identifier, got '{marker}'")]
    InvalidMarker { marker: String },
}
