use crate::provider::error::ProviderSystemError;
use crate::provider::locator::FactoryLocator;
use crate::provider::version::VersionRange;

/// Generated data is plain JSON; providers produce and consume it as-is.
pub type Value = serde_json::Value;

/// Trait implemented by every data provider.
///
/// A provider is a small, stateless-looking object that answers one or more
/// named operations. Arguments arrive positionally and the result is returned
/// unchanged to the caller; a provider never sees who asked or why.
pub trait Provider: Send + Sync {
    /// Unique name of the provider
    fn name(&self) -> &'static str;

    /// Operation names this provider answers
    fn operations(&self) -> Vec<&'static str>;

    /// Execute one operation with positional arguments.
    ///
    /// Implementations must return [`ProviderSystemError::UnsupportedOperation`]
    /// for operation names outside [`Provider::operations`], and
    /// [`ProviderSystemError::InvalidArguments`] when an argument cannot be
    /// used, rather than guessing at a value.
    fn call(&self, operation: &str, args: &[Value]) -> Result<Value, ProviderSystemError>;
}

/// Trait implemented by a bundle of provider factories.
///
/// A pack declares which engine API versions it supports and registers its
/// factories into a [`FactoryLocator`]. Packs are registered before the engine
/// starts, so every operation they cover is resolvable from the first call.
pub trait ProviderPack: Send + Sync {
    /// Unique name of the pack
    fn name(&self) -> &'static str;

    /// Version of the pack itself
    fn version(&self) -> &str;

    /// Engine API versions this pack works against
    fn compatible_api_versions(&self) -> Vec<VersionRange>;

    /// Register this pack's factories into the locator.
    fn register(&self, locator: &mut FactoryLocator) -> Result<(), ProviderSystemError>;
}
