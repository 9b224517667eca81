use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, info};

use crate::kernel::constants;
use crate::provider::context::ProviderContext;
use crate::provider::error::ProviderSystemError;
use crate::provider::ident::provider_ident;
use crate::provider::traits::{Provider, ProviderPack};
use crate::provider::version::ApiVersion;

/// Constructor for a provider instance, run at most once per registry entry.
pub type ProviderFactory =
    Box<dyn Fn(&ProviderContext) -> Result<Arc<dyn Provider>, ProviderSystemError> + Send + Sync>;

/// Source of provider instances, looked up by derived identifier.
///
/// The registry owns one locator and consults it only on a cache miss, so an
/// implementation may construct providers eagerly, lazily, or not at all.
pub trait ProviderLocator: Send + Sync {
    /// Construct or fetch the provider registered under `ident`.
    ///
    /// Returns [`ProviderSystemError::ProviderNotFound`] when nothing is
    /// registered under the identifier. The locator does not know which
    /// operation triggered the lookup; callers fill that in.
    fn resolve(&self, ident: &str) -> Result<Arc<dyn Provider>, ProviderSystemError>;

    /// Identifiers this locator can resolve, in registration order.
    fn registered(&self) -> Vec<String>;
}

/// Locator backed by a map of provider factories.
///
/// Factories are registered up front, before the engine starts, and each one
/// receives the shared [`ProviderContext`] when the registry first asks for
/// its identifier. A failed construction is reported to the caller and leaves
/// no trace here; the same identifier can be retried.
pub struct FactoryLocator {
    context: ProviderContext,
    factories: HashMap<String, ProviderFactory>,
    registration_order: Vec<String>,
    api_version: ApiVersion,
}

impl FactoryLocator {
    /// Create an empty locator bound to the given context.
    pub fn new(context: ProviderContext) -> Result<Self, ProviderSystemError> {
        let api_version = ApiVersion::parse(constants::API_VERSION)?;
        Ok(Self {
            context,
            factories: HashMap::new(),
            registration_order: Vec::new(),
            api_version,
        })
    }

    /// Register a factory under an explicit identifier.
    pub fn register(
        &mut self,
        ident: impl Into<String>,
        factory: ProviderFactory,
    ) -> Result<(), ProviderSystemError> {
        let ident = ident.into();
        if self.factories.contains_key(&ident) {
            return Err(ProviderSystemError::DuplicateFactory { ident });
        }
        debug!("Registered provider factory '{}'", ident);
        self.registration_order.push(ident.clone());
        self.factories.insert(ident, factory);
        Ok(())
    }

    /// Register a factory under the identifier derived from an operation name.
    pub fn register_operation(
        &mut self,
        operation: &str,
        factory: ProviderFactory,
    ) -> Result<(), ProviderSystemError> {
        self.register(provider_ident(operation), factory)
    }

    /// Register every factory of a pack, after checking API compatibility.
    pub fn register_pack(&mut self, pack: &dyn ProviderPack) -> Result<(), ProviderSystemError> {
        let ranges = pack.compatible_api_versions();
        let current = self.api_version.to_semver();
        if !ranges.iter().any(|range| range.includes(&current)) {
            let requirement = ranges
                .iter()
                .map(|range| range.constraint_string().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ProviderSystemError::IncompatibleApiVersion {
                pack: pack.name().to_string(),
                requirement,
                api_version: self.api_version.to_string(),
            });
        }
        pack.register(self)?;
        info!(
            "Registered provider pack '{}' v{}",
            pack.name(),
            pack.version()
        );
        Ok(())
    }

    pub fn factory_count(&self) -> usize {
        self.factories.len()
    }
}

impl fmt::Debug for FactoryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryLocator")
            .field("factory_count", &self.factories.len())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl ProviderLocator for FactoryLocator {
    fn resolve(&self, ident: &str) -> Result<Arc<dyn Provider>, ProviderSystemError> {
        let factory =
            self.factories
                .get(ident)
                .ok_or_else(|| ProviderSystemError::ProviderNotFound {
                    operation: None,
                    ident: ident.to_string(),
                })?;
        let provider = factory(&self.context)?;
        debug!(
            "Constructed provider '{}' for identifier '{}'",
            provider.name(),
            ident
        );
        Ok(provider)
    }

    fn registered(&self) -> Vec<String> {
        self.registration_order.clone()
    }
}
