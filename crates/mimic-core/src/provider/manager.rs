use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::Mutex;

use crate::kernel::component::KernelComponent;
use crate::kernel::error::Result as KernelResult;
use crate::provider::error::ProviderSystemError;
use crate::provider::locator::ProviderLocator;
use crate::provider::registry::ProviderRegistry;
use crate::provider::traits::{Provider, Value};

/// Kernel component exposing provider invocation to the rest of the engine.
#[async_trait]
pub trait ProviderManager: KernelComponent {
    /// Resolve the provider for `operation` and call it with `args`.
    async fn invoke(&self, operation: &str, args: &[Value]) -> Result<Value, ProviderSystemError>;

    /// Resolve the provider for `operation` without calling it.
    async fn resolve(&self, operation: &str) -> Result<Arc<dyn Provider>, ProviderSystemError>;

    /// Whether a provider is cached for this operation.
    async fn is_loaded(&self, operation: &str) -> bool;

    /// Operation names with a cached provider.
    async fn loaded_operations(&self) -> Vec<String>;

    /// Identifiers the locator can resolve, loaded or not.
    async fn available_providers(&self) -> Vec<String>;

    /// Drop the cached provider for an operation. Returns whether one was cached.
    async fn unload(&self, operation: &str) -> bool;
}

/// Default [`ProviderManager`] backed by a locked [`ProviderRegistry`].
///
/// One lock guards the cache's check-then-insert, so concurrent first calls
/// for the same operation load its provider exactly once. Provider calls run
/// after the lock is released; generation itself never serializes on the
/// cache.
#[derive(Clone)]
pub struct DefaultProviderManager {
    name: &'static str,
    registry: Arc<Mutex<ProviderRegistry>>,
}

impl DefaultProviderManager {
    pub fn new(locator: Box<dyn ProviderLocator>) -> Self {
        Self {
            name: "DefaultProviderManager",
            registry: Arc::new(Mutex::new(ProviderRegistry::new(locator))),
        }
    }

    /// Direct access to the shared registry, mainly for tests.
    pub fn registry(&self) -> &Arc<Mutex<ProviderRegistry>> {
        &self.registry
    }
}

impl fmt::Debug for DefaultProviderManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultProviderManager")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KernelComponent for DefaultProviderManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> KernelResult<()> {
        let registry = self.registry.lock().await;
        info!(
            "Provider manager initialized with {} registered identifier(s)",
            registry.locator().registered().len()
        );
        Ok(())
    }

    async fn start(&self) -> KernelResult<()> {
        debug!("Provider manager started");
        Ok(())
    }

    async fn stop(&self) -> KernelResult<()> {
        let mut registry = self.registry.lock().await;
        let dropped = registry.loaded_count();
        registry.clear();
        info!("Provider cache cleared ({} entries dropped)", dropped);
        Ok(())
    }
}

#[async_trait]
impl ProviderManager for DefaultProviderManager {
    async fn invoke(&self, operation: &str, args: &[Value]) -> Result<Value, ProviderSystemError> {
        // Hold the lock only for resolution; the call itself runs unlocked so
        // cached operations never wait on each other.
        let provider = {
            let mut registry = self.registry.lock().await;
            registry.resolve(operation)?
        };
        provider.call(operation, args)
    }

    async fn resolve(&self, operation: &str) -> Result<Arc<dyn Provider>, ProviderSystemError> {
        let mut registry = self.registry.lock().await;
        registry.resolve(operation)
    }

    async fn is_loaded(&self, operation: &str) -> bool {
        let registry = self.registry.lock().await;
        registry.is_loaded(operation)
    }

    async fn loaded_operations(&self) -> Vec<String> {
        let registry = self.registry.lock().await;
        registry.loaded_operations()
    }

    async fn available_providers(&self) -> Vec<String> {
        let registry = self.registry.lock().await;
        registry.locator().registered()
    }

    async fn unload(&self, operation: &str) -> bool {
        let mut registry = self.registry.lock().await;
        registry.unload(operation).is_some()
    }
}
