use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::error::Result;

/// Core lifecycle trait for all engine components
#[async_trait]
pub trait KernelComponent: Any + Send + Sync + Debug {
    fn name(&self) -> &'static str;
    async fn initialize(&self) -> Result<()>;
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
}

/// Registry storing engine components as `Arc<dyn KernelComponent>`,
/// keyed by the concrete type's `TypeId`.
#[derive(Default, Debug)]
pub struct DependencyRegistry {
    instances: HashMap<TypeId, Arc<dyn KernelComponent>>,
}

impl DependencyRegistry {
    /// Create a new empty dependency registry
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Register a component instance, stored as `Arc<dyn KernelComponent>`
    /// under the `TypeId` of the concrete type `V`.
    pub fn register_instance<V>(&mut self, instance: Arc<V>)
    where
        V: KernelComponent + 'static,
    {
        self.instances.insert(TypeId::of::<V>(), instance);
    }

    /// Get a component by the `TypeId` of its concrete type.
    pub fn get_component_by_id(&self, type_id: &TypeId) -> Option<Arc<dyn KernelComponent>> {
        self.instances.get(type_id).cloned()
    }

    /// Get a component by concrete type `T`, downcasting the stored trait object.
    pub fn get_concrete<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        self.instances.get(&TypeId::of::<T>()).and_then(|arc_kc| {
            // KernelComponent: Any, so the Arc can be viewed as Arc<dyn Any>
            // and downcast back to the concrete type it was registered under.
            let arc_any: Arc<dyn Any + Send + Sync> = arc_kc.clone();
            Arc::downcast::<T>(arc_any).ok()
        })
    }

    /// Whether a component of concrete type `T` is registered.
    pub fn contains<T: KernelComponent + 'static>(&self) -> bool {
        self.instances.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered components.
    pub fn component_count(&self) -> usize {
        self.instances.len()
    }

    /// Clear all instances.
    pub fn clear(&mut self) {
        self.instances.clear();
    }
}
