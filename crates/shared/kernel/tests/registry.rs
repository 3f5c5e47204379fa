use async_trait::async_trait;
use gantry_kernel::server::{ApiState, Modular, ModuleError, ModuleRegistry, RegistryError};
use std::any::Any;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
struct TestModule {
    name: &'static str,
}

impl TestModule {
    fn shared(name: &'static str) -> Arc<dyn Modular> {
        Arc::new(Self { name })
    }
}

#[async_trait]
impl Modular for TestModule {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn init(&self) -> Result<(), ModuleError> {
        Ok(())
    }

    async fn auto_migrate(&self) -> Result<(), ModuleError> {
        Ok(())
    }

    async fn release(&self) -> Result<(), ModuleError> {
        Ok(())
    }

    fn register_routers(
        &self,
        _version: &str,
        router: OpenApiRouter<ApiState>,
    ) -> Result<OpenApiRouter<ApiState>, ModuleError> {
        Ok(router)
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[test]
fn load_modules_returns_every_registration() {
    let registry = ModuleRegistry::new();
    for name in ["alpha", "beta", "gamma"] {
        registry.register(TestModule::shared(name)).expect("unique name registers");
    }

    let modules = registry.load_modules();
    assert_eq!(modules.len(), 3);

    let names: BTreeSet<&str> = modules.iter().map(|m| m.name()).collect();
    assert_eq!(names, BTreeSet::from(["alpha", "beta", "gamma"]));
}

#[test]
fn duplicate_registration_is_fatal_and_leaves_registry_intact() {
    let registry = ModuleRegistry::new();
    let first = TestModule::shared("users");
    registry.register(first.clone()).expect("first registration");

    let err = registry.register(TestModule::shared("users")).expect_err("duplicate rejected");
    assert!(matches!(&err, RegistryError::Duplicate { name } if name == "users"));
    assert!(err.is_fatal());

    // The failed call must not have replaced or removed the original entry.
    assert_eq!(registry.len(), 1);
    let loaded = registry.load("users").expect("original still present");
    assert!(Arc::ptr_eq(&loaded, &first));
}

#[test]
fn blank_name_registration_is_rejected_without_mutation() {
    let registry = ModuleRegistry::new();

    let err = registry.register(TestModule::shared("")).expect_err("blank name rejected");
    assert!(matches!(err, RegistryError::EmptyName));
    assert!(err.is_fatal());

    let err = registry.register(TestModule::shared("   ")).expect_err("whitespace name rejected");
    assert!(matches!(err, RegistryError::EmptyName));

    assert!(registry.is_empty());
}

#[test]
fn load_returns_the_registered_instance() {
    let registry = ModuleRegistry::new();
    let module = TestModule::shared("identity");
    registry.register(module.clone()).expect("registers");

    let loaded = registry.load("identity").expect("present");
    assert!(Arc::ptr_eq(&loaded, &module), "load must hand back the same instance");
}

#[test]
fn load_of_unknown_module_is_recoverable() {
    let registry = ModuleRegistry::new();

    let err = registry.load("missing").expect_err("unknown name errors");
    assert!(matches!(&err, RegistryError::Unknown { name } if name == "missing"));
    assert!(!err.is_fatal());
}

#[test]
fn concurrent_registration_loses_no_updates() {
    let registry = Arc::new(ModuleRegistry::new());

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let registry = registry.clone();
            thread::spawn(move || {
                let name: &'static str = Box::leak(format!("module-{i}").into_boxed_str());
                registry.register(TestModule::shared(name)).expect("unique name registers")
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("registering thread panicked");
    }

    assert_eq!(registry.len(), 100);
    let names: BTreeSet<String> = registry.names().into_iter().collect();
    assert_eq!(names.len(), 100);
    for i in 0..100 {
        assert!(names.contains(&format!("module-{i}")));
    }
}

#[test]
fn racing_registrations_of_one_name_have_exactly_one_winner() {
    let registry = Arc::new(ModuleRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || registry.register(TestModule::shared("contended")))
        })
        .collect();

    let results: Vec<_> =
        handles.into_iter().map(|h| h.join().expect("thread panicked")).collect();

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one racing registration may win");
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RegistryError::Duplicate { .. })),
        "every loser must observe the duplicate",
    );
    assert_eq!(registry.len(), 1);
}
