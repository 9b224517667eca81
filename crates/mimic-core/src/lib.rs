pub mod config;
pub mod kernel;
pub mod provider;

// Re-export key public types for the binary and provider packs
pub use kernel::bootstrap::{Engine, EngineOptions};
pub use kernel::error::Error as KernelError;
pub use config::{ConfigData, ConfigFormat};
pub use provider::{
    FactoryLocator, OptionSet, Provider, ProviderContext, ProviderLocator, ProviderManager,
    ProviderPack, ProviderSystemError, SharedRng, Value, VersionRange,
};
