use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use crate::provider::context::ProviderContext;
use crate::provider::error::ProviderSystemError;
use crate::provider::locator::{FactoryLocator, ProviderLocator};
use crate::provider::traits::{Provider, ProviderPack, Value};
use crate::provider::version::VersionRange;

// --- Mock providers and packs ---

struct StaticProvider {
    name: &'static str,
    operations: Vec<&'static str>,
    value: Value,
}

impl StaticProvider {
    fn new(name: &'static str, operations: Vec<&'static str>, value: Value) -> Self {
        Self {
            name,
            operations,
            value,
        }
    }
}

impl Provider for StaticProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn operations(&self) -> Vec<&'static str> {
        self.operations.clone()
    }

    fn call(&self, operation: &str, _args: &[Value]) -> Result<Value, ProviderSystemError> {
        if !self.operations.contains(&operation) {
            return Err(ProviderSystemError::UnsupportedOperation {
                provider: self.name.to_string(),
                operation: operation.to_string(),
            });
        }
        Ok(self.value.clone())
    }
}

struct MockPack {
    name: &'static str,
    compatible: Vec<VersionRange>,
}

impl ProviderPack for MockPack {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        self.compatible.clone()
    }

    fn register(
        &self,
        locator: &mut FactoryLocator,
    ) -> Result<(), ProviderSystemError> {
        locator.register_operation(
            "packaged",
            Box::new(|_ctx| {
                Ok(Arc::new(StaticProvider::new(
                    "packaged",
                    vec!["packaged"],
                    json!("from pack"),
                )) as Arc<dyn Provider>)
            }),
        )
    }
}

fn empty_locator() -> FactoryLocator {
    FactoryLocator::new(ProviderContext::with_entropy()).expect("locator construction failed")
}

// --- Tests ---

#[test]
fn test_register_and_resolve() {
    let mut locator = empty_locator();
    locator
        .register(
            "mimic::provider::Greeting",
            Box::new(|_ctx| {
                Ok(Arc::new(StaticProvider::new(
                    "greeting",
                    vec!["greeting"],
                    json!("hello"),
                )) as Arc<dyn Provider>)
            }),
        )
        .expect("register failed");

    let provider = locator
        .resolve("mimic::provider::Greeting")
        .expect("resolve failed");
    assert_eq!(provider.name(), "greeting");
    assert_eq!(locator.factory_count(), 1);
}

#[test]
fn test_resolve_unknown_ident_reports_not_found() {
    let locator = empty_locator();
    let err = locator
        .resolve("mimic::provider::Missing")
        .err()
        .expect("expected error");
    match err {
        ProviderSystemError::ProviderNotFound { operation, ident } => {
            // The locator does not know the operation; only the registry does.
            assert_eq!(operation, None);
            assert_eq!(ident, "mimic::provider::Missing");
        }
        other => panic!("Expected ProviderNotFound, got {:?}", other),
    }
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut locator = empty_locator();
    let make_factory = || {
        Box::new(|_ctx: &ProviderContext| {
            Ok(Arc::new(StaticProvider::new("dup", vec!["dup"], json!(1))) as Arc<dyn Provider>)
        })
    };
    locator
        .register("mimic::provider::Dup", make_factory())
        .expect("first register failed");

    let err = locator
        .register("mimic::provider::Dup", make_factory())
        .unwrap_err();
    match err {
        ProviderSystemError::DuplicateFactory { ident } => {
            assert_eq!(ident, "mimic::provider::Dup");
        }
        other => panic!("Expected DuplicateFactory, got {:?}", other),
    }
    // The original factory survives.
    assert_eq!(locator.factory_count(), 1);
}

#[test]
fn test_register_operation_derives_ident() {
    let mut locator = empty_locator();
    locator
        .register_operation(
            "email",
            Box::new(|_ctx| {
                Ok(Arc::new(StaticProvider::new(
                    "email",
                    vec!["email"],
                    json!("e@example.org"),
                )) as Arc<dyn Provider>)
            }),
        )
        .expect("register_operation failed");

    assert!(locator.resolve("mimic::provider::Email").is_ok());
    assert_eq!(locator.registered(), vec!["mimic::provider::Email"]);
}

#[test]
fn test_registered_preserves_registration_order() {
    let mut locator = empty_locator();
    for op in ["zeta", "alpha", "midway"] {
        locator
            .register_operation(
                op,
                Box::new(|_ctx| {
                    Ok(Arc::new(StaticProvider::new("any", vec![], json!(null)))
                        as Arc<dyn Provider>)
                }),
            )
            .expect("register_operation failed");
    }
    assert_eq!(
        locator.registered(),
        vec![
            "mimic::provider::Zeta",
            "mimic::provider::Alpha",
            "mimic::provider::Midway",
        ]
    );
}

#[test]
fn test_factories_run_per_resolve() {
    // The locator memoizes nothing; caching is the registry's job.
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_factory = Arc::clone(&calls);

    let mut locator = empty_locator();
    locator
        .register_operation(
            "counted",
            Box::new(move |_ctx| {
                calls_in_factory.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(StaticProvider::new(
                    "counted",
                    vec!["counted"],
                    json!(0),
                )) as Arc<dyn Provider>)
            }),
        )
        .expect("register_operation failed");

    locator.resolve("mimic::provider::Counted").expect("resolve failed");
    locator.resolve("mimic::provider::Counted").expect("resolve failed");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_factory_failure_propagates_and_is_retryable() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_in_factory = Arc::clone(&attempts);

    let mut locator = empty_locator();
    locator
        .register_operation(
            "flaky",
            Box::new(move |_ctx| {
                attempts_in_factory.fetch_add(1, Ordering::SeqCst);
                Err(ProviderSystemError::ConstructionError {
                    ident: "mimic::provider::Flaky".to_string(),
                    message: "backing store offline".to_string(),
                })
            }),
        )
        .expect("register_operation failed");

    for _ in 0..2 {
        let err = locator
            .resolve("mimic::provider::Flaky")
            .err()
            .expect("expected error");
        assert!(matches!(err, ProviderSystemError::ConstructionError { .. }));
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_register_pack_with_compatible_api() {
    let mut locator = empty_locator();
    let pack = MockPack {
        name: "mock-pack",
        compatible: vec![VersionRange::from_str(">=0.1.0").unwrap()],
    };
    locator.register_pack(&pack).expect("register_pack failed");

    assert!(locator.resolve("mimic::provider::Packaged").is_ok());
}

#[test]
fn test_register_pack_with_incompatible_api() {
    let mut locator = empty_locator();
    let pack = MockPack {
        name: "future-pack",
        compatible: vec![VersionRange::from_str(">=99.0.0").unwrap()],
    };

    let err = locator.register_pack(&pack).unwrap_err();
    match err {
        ProviderSystemError::IncompatibleApiVersion { pack, requirement, .. } => {
            assert_eq!(pack, "future-pack");
            assert!(requirement.contains(">=99.0.0"));
        }
        other => panic!("Expected IncompatibleApiVersion, got {:?}", other),
    }
    // Nothing from the pack was registered.
    assert_eq!(locator.factory_count(), 0);
}
