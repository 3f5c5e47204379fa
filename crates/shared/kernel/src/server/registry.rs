//! Module registry for the platform bootstrap.
//! A registry instance maps module names to [`Modular`] implementations; the server
//! fills one at startup and drives every entry through its lifecycle.

use super::state::ApiState;
use async_trait::async_trait;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::any::Any;
use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

/// Boxed error for module lifecycle hooks, so every module can surface its own error type.
pub type ModuleError = Box<dyn std::error::Error + Send + Sync>;

/// Capability set every platform module must implement.
///
/// A module self-reports a stable, process-unique [`Modular::name`] and is driven by the
/// bootstrap through `init` → `auto_migrate` → route registration, and `release` on shutdown.
#[async_trait]
pub trait Modular: Any + Debug + Send + Sync {
    /// Stable identifier the module is registered under. Must be non-empty.
    fn name(&self) -> &'static str;

    /// One-time setup before the module serves traffic.
    async fn init(&self) -> Result<(), ModuleError>;

    /// Idempotent state migration; safe to run on every startup.
    async fn auto_migrate(&self) -> Result<(), ModuleError>;

    /// Teardown after the server has stopped accepting requests.
    async fn release(&self) -> Result<(), ModuleError>;

    /// Attaches the module's HTTP handlers under the given API version prefix.
    fn register_routers(
        &self,
        version: &str,
        router: OpenApiRouter<ApiState>,
    ) -> Result<OpenApiRouter<ApiState>, ModuleError>;

    /// Helper to allow downcasting from the trait object.
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Registration and lookup failures.
///
/// The two tiers matter: [`RegistryError::Duplicate`] and [`RegistryError::EmptyName`] are
/// startup wiring defects — callers must treat them as fatal and abort the bootstrap instead
/// of recovering. Only [`RegistryError::Unknown`] is an ordinary runtime condition, raised
/// when an optional module was never registered. [`RegistryError::is_fatal`] encodes the split.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A second module claimed an already-registered name.
    #[error("module registry: register called twice for module `{name}`")]
    Duplicate { name: Cow<'static, str> },

    /// A module reported a blank name.
    #[error("module registry: module reported an empty name")]
    EmptyName,

    /// Lookup of a name that was never registered.
    #[error("module registry: unknown module `{name}` (forgotten registration?)")]
    Unknown { name: Cow<'static, str> },
}

impl RegistryError {
    /// Whether this error is a wiring defect that must abort the bootstrap.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Duplicate { .. } | Self::EmptyName)
    }
}

/// Mapping from module name to module instance, append-only for its lifetime.
///
/// Every access to the inner map is serialized by a single mutex, held only for the
/// duration of the map operation. Build one with [`ModuleRegistry::new`] and pass it to
/// whatever bootstrap needs it; independent registries (e.g. in tests) never interfere.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Mutex<FxHashMap<String, Arc<dyn Modular>>>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under its self-reported name.
    ///
    /// # Errors
    /// Returns the fatal-tier [`RegistryError::EmptyName`] for a blank name and
    /// [`RegistryError::Duplicate`] when the name is already taken. A failed call
    /// leaves the registry untouched.
    pub fn register(&self, module: Arc<dyn Modular>) -> Result<(), RegistryError> {
        let name = module.name();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut modules = self.modules.lock();
        if modules.contains_key(name) {
            return Err(RegistryError::Duplicate { name: Cow::Borrowed(name) });
        }
        modules.insert(name.to_owned(), module);

        Ok(())
    }

    /// Returns a snapshot of every registered module, in unspecified order.
    ///
    /// The snapshot is a shallow copy: the returned handles share the module
    /// instances with the registry and with every other caller.
    #[must_use]
    pub fn load_modules(&self) -> Vec<Arc<dyn Modular>> {
        self.modules.lock().values().cloned().collect()
    }

    /// Looks up one module by name.
    ///
    /// # Errors
    /// Returns the recoverable [`RegistryError::Unknown`] when the name was never
    /// registered — the expected branch for optional modules.
    pub fn load(&self, name: &str) -> Result<Arc<dyn Modular>, RegistryError> {
        self.modules
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::Unknown { name: Cow::Owned(name.to_owned()) })
    }

    /// Registered module names, in unspecified order (for diagnostics).
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.modules.lock().keys().cloned().collect()
    }

    /// Number of registered modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.lock().is_empty()
    }
}
