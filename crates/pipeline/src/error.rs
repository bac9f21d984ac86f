//! Error types for preference configuration loading.

use thiserror::Error;

/// Errors raised while loading or validating a preference table
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {axis} option '{id}': {reason}")]
    InvalidOption {
        axis: String,
        id: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
