//! Error types for manifest and config-file handling.

use nixargs_core::RegistrationError;
use thiserror::Error;

/// Errors that can occur while loading manifests and config files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An option in the manifest was rejected by its option set.
    #[error("invalid option: {0}")]
    Registration(#[from] RegistrationError),

    /// A command path does not name a command in the manifest.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
