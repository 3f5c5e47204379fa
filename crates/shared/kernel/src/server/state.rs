use super::registry::{Modular, ModuleRegistry};
use axum::extract::FromRef;
use gantry_domain::config::ApiConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiStateError {
    #[error("State validation error: {message}")]
    Validation { message: Cow<'static, str> },
    #[error("State missing module: {message}")]
    MissingModule { message: Cow<'static, str> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub modules: Arc<ModuleRegistry>,
}

#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    /// Returns the concrete module registered under `name`, if present and of type `T`.
    #[must_use]
    pub fn module<T: Modular>(&self, name: &str) -> Option<Arc<T>> {
        self.inner
            .modules
            .load(name)
            .ok()
            .and_then(|module| module.as_any().downcast::<T>().ok())
    }

    /// Returns the concrete module registered under `name`.
    ///
    /// # Errors
    /// Returns an error if no module of type `T` is registered under that name.
    pub fn try_module<T: Modular>(&self, name: &str) -> Result<Arc<T>, ApiStateError> {
        self.module(name)
            .ok_or_else(|| ApiStateError::MissingModule { message: Cow::Owned(name.to_owned()) })
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Arc<ModuleRegistry> {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.modules.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    modules: Option<Arc<ModuleRegistry>>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn modules(mut self, modules: Arc<ModuleRegistry>) -> Self {
        self.modules = Some(modules);
        self
    }

    /// Finalizes the state.
    ///
    /// # Errors
    /// Returns an error if the configuration was not provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or(ApiStateError::Validation {
            message: Cow::Borrowed("ApiConfig not provided"),
        })?;
        let modules = self.modules.unwrap_or_default();

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, modules }) })
    }
}
