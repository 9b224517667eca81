use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::provider::error::ProviderSystemError;
use crate::provider::ident::provider_ident;
use crate::provider::locator::ProviderLocator;
use crate::provider::traits::{Provider, Value};

/// Cache of resolved providers, keyed by the operation name that loaded them.
///
/// The first call for an operation derives the provider identifier, asks the
/// locator for an instance, and stores it before use; every later call for
/// the same name is served from the cache without touching the locator.
/// A failed resolution stores nothing, so the next call retries from scratch.
pub struct ProviderRegistry {
    loaded: HashMap<String, Arc<dyn Provider>>,
    locator: Box<dyn ProviderLocator>,
}

impl ProviderRegistry {
    pub fn new(locator: Box<dyn ProviderLocator>) -> Self {
        Self {
            loaded: HashMap::new(),
            locator,
        }
    }

    /// Resolve the provider for an operation, loading it on first use.
    pub fn resolve(&mut self, operation: &str) -> Result<Arc<dyn Provider>, ProviderSystemError> {
        if let Some(provider) = self.loaded.get(operation) {
            return Ok(Arc::clone(provider));
        }

        let ident = provider_ident(operation);
        // The locator only knows the identifier; restore the operation name
        // so a miss reports what the caller actually asked for.
        let provider = self.locator.resolve(&ident).map_err(|err| match err {
            ProviderSystemError::ProviderNotFound { ident, .. } => {
                ProviderSystemError::ProviderNotFound {
                    operation: Some(operation.to_string()),
                    ident,
                }
            }
            other => other,
        })?;

        debug!(
            "Loaded provider '{}' for operation '{}'",
            provider.name(),
            operation
        );
        self.loaded
            .insert(operation.to_string(), Arc::clone(&provider));
        Ok(provider)
    }

    /// Resolve the provider for an operation and call it with `args`.
    ///
    /// The provider is cached on resolution, before the call runs, so an
    /// unsupported operation on a found provider does not evict it.
    pub fn invoke(&mut self, operation: &str, args: &[Value]) -> Result<Value, ProviderSystemError> {
        let provider = self.resolve(operation)?;
        provider.call(operation, args)
    }

    pub fn is_loaded(&self, operation: &str) -> bool {
        self.loaded.contains_key(operation)
    }

    /// Operation names with a cached provider, sorted for stable output.
    pub fn loaded_operations(&self) -> Vec<String> {
        let mut operations: Vec<String> = self.loaded.keys().cloned().collect();
        operations.sort();
        operations
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Drop the cached provider for an operation, returning it if present.
    ///
    /// The next call for this operation goes back through the locator.
    pub fn unload(&mut self, operation: &str) -> Option<Arc<dyn Provider>> {
        let removed = self.loaded.remove(operation);
        if removed.is_some() {
            debug!("Unloaded provider for operation '{}'", operation);
        }
        removed
    }

    /// Drop every cached provider.
    pub fn clear(&mut self) {
        self.loaded.clear();
    }

    pub fn locator(&self) -> &dyn ProviderLocator {
        self.locator.as_ref()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("loaded_count", &self.loaded.len())
            .finish_non_exhaustive()
    }
}
