//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, editing or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but is not valid INI.
    #[error("Failed to read config file {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    /// The file or its directory could not be written.
    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No such `section.key`.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// The value is not acceptable for the key.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
