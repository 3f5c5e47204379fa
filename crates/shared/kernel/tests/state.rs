use async_trait::async_trait;
use gantry_domain::config::ApiConfig;
use gantry_kernel::server::{
    ApiState, ApiStateError, Modular, ModuleError, ModuleRegistry, RegistryError,
};
use std::any::Any;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
struct EchoModule;

#[async_trait]
impl Modular for EchoModule {
    fn name(&self) -> &'static str {
        "echo"
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

#[derive(Debug)]
struct OtherModule;

#[async_trait]
impl Modular for OtherModule {
    fn name(&self) -> &'static str {
        "other"
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

fn state_with_echo() -> ApiState {
    let registry = ModuleRegistry::new();
    registry.register(Arc::new(EchoModule)).expect("registers");

    ApiState::builder()
        .config(ApiConfig::default())
        .modules(Arc::new(registry))
        .build()
        .expect("state builds")
}

#[test]
fn builder_requires_config() {
    let err = ApiState::builder().build().expect_err("missing config rejected");
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[test]
fn builder_defaults_to_empty_registry() {
    let state =
        ApiState::builder().config(ApiConfig::default()).build().expect("state builds");
    assert!(state.modules.is_empty());
}

#[test]
fn module_accessor_downcasts_to_the_concrete_type() {
    let state = state_with_echo();

    let echo = state.module::<EchoModule>("echo");
    assert!(echo.is_some());

    let typed = state.try_module::<EchoModule>("echo").expect("typed lookup");
    assert_eq!(typed.name(), "echo");
}

#[test]
fn module_accessor_rejects_wrong_type_or_name() {
    let state = state_with_echo();

    // Registered name, wrong concrete type.
    assert!(state.module::<OtherModule>("echo").is_none());

    // Never registered.
    let err = state.try_module::<EchoModule>("ghost").expect_err("missing module");
    assert!(matches!(err, ApiStateError::MissingModule { .. }));
}

#[test]
fn registry_lookup_through_state_is_shared() {
    let state = state_with_echo();

    let direct = state.modules.load("echo").expect("present");
    let err = state.modules.load("ghost").expect_err("absent");
    assert!(matches!(err, RegistryError::Unknown { .. }));
    assert_eq!(direct.name(), "echo");
}
