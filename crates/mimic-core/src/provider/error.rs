//! # Mimic Core Provider System Errors
//!
//! Defines error types specific to the provider system.
//!
//! [`ProviderSystemError`] is the primary enum covering failures during
//! provider resolution and invocation: an operation name the locator cannot
//! map to a registered factory, an operation a resolved provider does not
//! implement, malformed operation arguments, and pack registration problems
//! (duplicate identifiers, incompatible API versions).
use crate::provider::version::VersionError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderSystemError {
    /// The locator has no factory for the identifier derived from the
    /// operation name. The locator itself reports `operation: None`; the
    /// registry fills in the operation it was resolving.
    #[error("no provider registered for operation '{operation}' (identifier '{ident}')", operation = .operation.as_deref().unwrap_or("<unresolved>"))]
    ProviderNotFound {
        operation: Option<String>,
        ident: String,
    },

    /// A provider was resolved but does not implement the requested operation.
    #[error("provider '{provider}' does not support operation '{operation}'")]
    UnsupportedOperation {
        provider: String,
        operation: String,
    },

    /// An operation rejected the arguments it was forwarded.
    #[error("invalid arguments for operation '{operation}': {message}")]
    InvalidArguments {
        operation: String,
        message: String,
    },

    /// A factory is already registered under this identifier.
    #[error("a provider factory is already registered under '{ident}'")]
    DuplicateFactory {
        ident: String,
    },

    /// A provider pack declared API ranges that exclude the engine's API version.
    #[error("pack '{pack}' requires API '{requirement}', engine API is {api_version}")]
    IncompatibleApiVersion {
        pack: String,
        requirement: String,
        api_version: String,
    },

    /// A provider factory failed while constructing its provider.
    #[error("factory for '{ident}' failed: {message}")]
    ConstructionError {
        ident: String,
        message: String,
    },

    #[error("Version parsing error: {0}")]
    VersionParsing(#[from] VersionError),

    #[error("Internal provider system error: {0}")]
    InternalError(String),
}
