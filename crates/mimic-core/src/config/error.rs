//! # Mimic Core Config System Errors
//!
//! Defines error types specific to the configuration system: file I/O while
//! loading a profile, parse failures per format, and unsupported profile
//! formats.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedConfigFormat(String),

    #[error("Invalid config value for key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

// Helper for creating Io errors, ensuring path is always included.
impl ConfigSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        ConfigSystemError::Io {
            path,
            operation: operation.into(),
            source,
        }
    }
}
