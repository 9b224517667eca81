use std::sync::Arc;

use serde_json::json;

use crate::config::data::ConfigData;
use crate::config::manager::DefaultConfigManager;
use crate::kernel::bootstrap::{Engine, EngineOptions};
use crate::kernel::error::{Error, KernelLifecyclePhase};
use crate::provider::context::{ProviderContext, SharedRng};
use crate::provider::locator::FactoryLocator;
use crate::provider::manager::{DefaultProviderManager, ProviderManager};
use crate::provider::traits::{Provider, Value};
use crate::provider::ProviderSystemError;

fn engine_with_echo() -> Engine {
    struct Echo;
    impl Provider for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }
        fn operations(&self) -> Vec<&'static str> {
            vec!["echo"]
        }
        fn call(&self, _operation: &str, args: &[Value]) -> Result<Value, ProviderSystemError> {
            Ok(Value::Array(args.to_vec()))
        }
    }

    let mut config = ConfigData::new();
    config
        .set("generate.count", 3)
        .expect("setting config value failed");

    let context = ProviderContext::new(SharedRng::from_seed(7), Arc::new(config.clone()));
    let mut locator = FactoryLocator::new(context).expect("locator construction failed");
    locator
        .register_operation(
            "echo",
            Box::new(|_ctx| Ok(Arc::new(Echo) as Arc<dyn Provider>)),
        )
        .expect("register_operation failed");

    Engine::with_options(EngineOptions {
        config,
        locator: Box::new(locator),
    })
    .expect("engine construction failed")
}

#[tokio::test]
async fn test_new_engine_has_default_components() {
    let engine = Engine::new().expect("Engine::new failed");
    assert!(!engine.is_initialized());

    assert!(engine.get_component::<DefaultConfigManager>().await.is_some());
    assert!(engine.get_component::<DefaultProviderManager>().await.is_some());
}

#[tokio::test]
async fn test_lifecycle_initialize_start_shutdown() {
    let mut engine = engine_with_echo();
    assert!(!engine.is_initialized());

    engine.initialize().await.expect("initialize failed");
    assert!(engine.is_initialized());

    engine.start().await.expect("start failed");
    engine.shutdown().await.expect("shutdown failed");
    assert!(!engine.is_initialized());
}

#[tokio::test]
async fn test_start_requires_initialize() {
    let mut engine = engine_with_echo();
    let err = engine.start().await.unwrap_err();
    match err {
        Error::KernelLifecycleError { phase, .. } => {
            assert_eq!(phase, KernelLifecyclePhase::Start);
        }
        other => panic!("Expected KernelLifecycleError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_initialize_twice_is_a_noop() {
    let mut engine = engine_with_echo();
    engine.initialize().await.expect("first initialize failed");
    engine.initialize().await.expect("second initialize failed");
    assert!(engine.is_initialized());
}

#[tokio::test]
async fn test_options_wire_config_and_locator() {
    let mut engine = engine_with_echo();
    engine.initialize().await.expect("initialize failed");

    let config_manager = engine.config_manager().await.expect("config manager missing");
    assert_eq!(config_manager.get::<u32>("generate.count").await, Some(3));

    let provider_manager = engine
        .provider_manager()
        .await
        .expect("provider manager missing");
    let result = provider_manager
        .invoke("echo", &[json!("a"), json!("b")])
        .await
        .expect("invoke failed");
    assert_eq!(result, json!(["a", "b"]));
}

#[tokio::test]
async fn test_shutdown_clears_provider_cache() {
    let mut engine = engine_with_echo();
    engine.initialize().await.expect("initialize failed");

    let provider_manager = engine
        .provider_manager()
        .await
        .expect("provider manager missing");
    provider_manager
        .invoke("echo", &[])
        .await
        .expect("invoke failed");
    assert!(provider_manager.is_loaded("echo").await);

    engine.shutdown().await.expect("shutdown failed");
    assert!(!provider_manager.is_loaded("echo").await);
}

#[tokio::test]
async fn test_get_component_for_unregistered_type() {
    use crate::kernel::component::KernelComponent;
    use crate::kernel::error::Result;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct Unregistered;

    #[async_trait]
    impl KernelComponent for Unregistered {
        fn name(&self) -> &'static str {
            "Unregistered"
        }
        async fn initialize(&self) -> Result<()> {
            Ok(())
        }
        async fn start(&self) -> Result<()> {
            Ok(())
        }
        async fn stop(&self) -> Result<()> {
            Ok(())
        }
    }

    let engine = Engine::new().expect("Engine::new failed");
    assert!(engine.get_component::<Unregistered>().await.is_none());
}
