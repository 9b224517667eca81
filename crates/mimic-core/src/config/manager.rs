use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::data::ConfigData;
use crate::kernel::component::KernelComponent;
use crate::kernel::error::Result;

/// Config system component interface
#[async_trait]
pub trait ConfigManager: KernelComponent {
    /// Snapshot of the current profile data
    async fn data(&self) -> ConfigData;

    /// Typed read of a single profile key
    async fn get_value(&self, key: &str) -> Option<serde_json::Value>;
}

/// Default implementation of the config manager.
///
/// Holds the generation profile the engine was constructed with. Profiles
/// are load-only: mimic reads them to shape generation (seed, option sets,
/// presets) and never writes settings back to disk.
#[derive(Clone)]
pub struct DefaultConfigManager {
    name: &'static str,
    data: Arc<Mutex<ConfigData>>,
}

impl DefaultConfigManager {
    /// Create a config manager over an already-loaded profile
    pub fn new(data: ConfigData) -> Self {
        Self {
            name: "DefaultConfigManager",
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Typed read of a single profile key
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.data.lock().await.get(key)
    }

    /// Typed read with a fallback value
    pub async fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.data.lock().await.get_or(key, default)
    }

    /// Merge overrides into the held profile (e.g. CLI flags on top of a file)
    pub async fn apply_overrides(&self, overrides: &ConfigData) {
        self.data.lock().await.merge(overrides);
    }
}

impl Debug for DefaultConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultConfigManager")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KernelComponent for DefaultConfigManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        let data = self.data.lock().await;
        log::info!(
            "Config manager initialized with {} profile key(s)",
            data.len()
        );
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ConfigManager for DefaultConfigManager {
    async fn data(&self) -> ConfigData {
        self.data.lock().await.clone()
    }

    async fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        self.data.lock().await.get(key)
    }
}
