use std::any::TypeId;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::Mutex;

use crate::config::data::ConfigData;
use crate::config::manager::DefaultConfigManager;
use crate::kernel::component::{DependencyRegistry, KernelComponent};
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::provider::context::ProviderContext;
use crate::provider::locator::{FactoryLocator, ProviderLocator};
use crate::provider::manager::DefaultProviderManager;

/// Everything the engine needs at construction time.
///
/// The locator arrives fully populated; nothing can register providers after
/// the engine is built, which is what makes first-call resolution reliable.
pub struct EngineOptions {
    pub config: ConfigData,
    pub locator: Box<dyn ProviderLocator>,
}

/// The engine: owns the component registry and drives component lifecycles.
///
/// Construction wires the config and provider managers into the dependency
/// registry, [`initialize`](Engine::initialize) and [`start`](Engine::start)
/// walk them in registration order, and [`shutdown`](Engine::shutdown) stops
/// them in reverse.
pub struct Engine {
    initialized: bool,
    dependencies: Arc<Mutex<DependencyRegistry>>,
    component_init_order: Vec<TypeId>,
}

impl Engine {
    /// Engine with an empty profile and an empty factory locator.
    ///
    /// Useful for tests and for callers that only need the config side; an
    /// engine built this way answers every invocation with a provider miss.
    pub fn new() -> Result<Self> {
        let locator = FactoryLocator::new(ProviderContext::with_entropy())?;
        Self::with_options(EngineOptions {
            config: ConfigData::new(),
            locator: Box::new(locator),
        })
    }

    /// Engine over a prepared profile and locator.
    pub fn with_options(options: EngineOptions) -> Result<Self> {
        info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let mut dependencies = DependencyRegistry::new();
        let mut component_init_order = Vec::new();

        let config_manager = Arc::new(DefaultConfigManager::new(options.config));
        dependencies.register_instance::<DefaultConfigManager>(config_manager);
        component_init_order.push(TypeId::of::<DefaultConfigManager>());

        let provider_manager = Arc::new(DefaultProviderManager::new(options.locator));
        dependencies.register_instance::<DefaultProviderManager>(provider_manager);
        component_init_order.push(TypeId::of::<DefaultProviderManager>());

        debug!(
            "Engine bootstrapped with {} component(s)",
            component_init_order.len()
        );
        Ok(Self {
            initialized: false,
            dependencies: Arc::new(Mutex::new(dependencies)),
            component_init_order,
        })
    }

    /// Initialize all components in registration order.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            warn!("Engine already initialized; skipping");
            return Ok(());
        }
        info!("Initializing engine components...");

        let dependencies = self.dependencies.lock().await;
        for type_id in &self.component_init_order {
            let component = dependencies.get_component_by_id(type_id).ok_or_else(|| {
                Error::ComponentRegistryError {
                    operation: "initialize".to_string(),
                    component_name: None,
                    message: format!("component {:?} missing from registry", type_id),
                }
            })?;
            debug!("Initializing component: {}", component.name());
            component.initialize().await.map_err(|err| Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Initialize,
                component_name: Some(component.name().to_string()),
                message: "component initialization failed".to_string(),
                source: Some(Box::new(err)),
            })?;
        }
        drop(dependencies);

        self.initialized = true;
        info!("Engine components initialized");
        Ok(())
    }

    /// Start all components in registration order. Requires [`Engine::initialize`].
    pub async fn start(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Start,
                component_name: None,
                message: "engine has not been initialized".to_string(),
                source: None,
            });
        }
        info!("Starting engine components...");

        let dependencies = self.dependencies.lock().await;
        for type_id in &self.component_init_order {
            if let Some(component) = dependencies.get_component_by_id(type_id) {
                debug!("Starting component: {}", component.name());
                component.start().await.map_err(|err| Error::KernelLifecycleError {
                    phase: KernelLifecyclePhase::Start,
                    component_name: Some(component.name().to_string()),
                    message: "component start failed".to_string(),
                    source: Some(Box::new(err)),
                })?;
            }
        }
        info!("Engine components started");
        Ok(())
    }

    /// Stop all components in reverse registration order.
    ///
    /// Every component gets its stop call even when an earlier one fails;
    /// the first failure is reported after the sweep completes.
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down engine components...");

        let mut first_failure: Option<Error> = None;
        let dependencies = self.dependencies.lock().await;
        for type_id in self.component_init_order.iter().rev() {
            if let Some(component) = dependencies.get_component_by_id(type_id) {
                debug!("Stopping component: {}", component.name());
                if let Err(err) = component.stop().await {
                    error!("Component {} failed to stop: {}", component.name(), err);
                    first_failure.get_or_insert(Error::KernelLifecycleError {
                        phase: KernelLifecyclePhase::Shutdown,
                        component_name: Some(component.name().to_string()),
                        message: "component stop failed".to_string(),
                        source: Some(Box::new(err)),
                    });
                }
            }
        }
        drop(dependencies);

        self.initialized = false;
        match first_failure {
            Some(err) => Err(err),
            None => {
                info!("Engine shut down");
                Ok(())
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Fetch a component by concrete type.
    pub async fn get_component<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        let dependencies = self.dependencies.lock().await;
        dependencies.get_concrete::<T>()
    }

    /// The provider manager, which every engine carries.
    pub async fn provider_manager(&self) -> Result<Arc<DefaultProviderManager>> {
        self.get_component::<DefaultProviderManager>()
            .await
            .ok_or_else(|| Error::ComponentRegistryError {
                operation: "get".to_string(),
                component_name: Some("DefaultProviderManager".to_string()),
                message: "component not registered".to_string(),
            })
    }

    /// The config manager, which every engine carries.
    pub async fn config_manager(&self) -> Result<Arc<DefaultConfigManager>> {
        self.get_component::<DefaultConfigManager>()
            .await
            .ok_or_else(|| Error::ComponentRegistryError {
                operation: "get".to_string(),
                component_name: Some("DefaultConfigManager".to_string()),
                message: "component not registered".to_string(),
            })
    }
}
