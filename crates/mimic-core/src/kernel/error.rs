//! # Mimic Core Kernel Errors
//!
//! Defines error types specific to the mimic kernel.
//!
//! This module includes [`Error`], the primary enum encompassing errors that
//! can occur during engine operations, such as bootstrap failures, component
//! lifecycle issues, or problems with the dependency registry. Subsystem
//! errors ([`ProviderSystemError`], [`ConfigSystemError`]) convert into it
//! via `#[from]`.
use std::result::Result as StdResult;

use crate::config::error::ConfigSystemError;
use crate::provider::error::ProviderSystemError;
use thiserror::Error as ThisError;

/// Top-level error type for the mimic engine
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed provider system error
    #[error("Provider system error: {0}")]
    ProviderSystem(#[from] ProviderSystemError),

    /// Specific, typed configuration system error
    #[error("Config system error: {0}")]
    ConfigSystem(#[from] ConfigSystemError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        component_name: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Error related to the DependencyRegistry operations or component lookup failures.
    #[error("Component registry error during operation '{operation}': {message}")]
    ComponentRegistryError {
        operation: String,
        component_name: Option<String>,
        message: String,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the engine's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelLifecyclePhase {
    Bootstrap,
    Initialize,
    Start,
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
