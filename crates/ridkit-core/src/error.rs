//! Error types for ridkit

use thiserror::Error;

/// The main error type for ridkit operations
#[derive(Debug, Error)]
pub enum RidkitError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provided path has empty file name '{path}'")]
    MalformedPath { path: String },

    #[error("Library '{library}' declares more than one {kind} asset group for runtime '{runtime}'")]
    DuplicateAssetGroup {
        library: String,
        kind: String,
        runtime: String,
    },

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Unknown asset kind '{0}' (expected native, runtime or resource)")]
    UnknownAssetKind(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for ridkit operations
pub type Result<T> = std::result::Result<T, RidkitError>;

impl From<toml::de::Error> for RidkitError {
    fn from(err: toml::de::Error) -> Self {
        RidkitError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for RidkitError {
    fn from(err: toml::ser::Error) -> Self {
        RidkitError::TomlSerError(err.to_string())
    }
}
