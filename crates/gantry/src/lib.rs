//! Facade crate for `Gantry` modules and shared crates.
//! Re-exports domain/kernel primitives and aggregates module registration.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] to build a module registry from the configuration; extend it as new
//!   modules appear.
//! - The bootstrap drives every registered module through its lifecycle.

pub use gantry_domain as domain;
use gantry_domain::config::ApiConfig;
use gantry_domain::modules::ModuleSet;
pub use gantry_kernel as kernel;
use gantry_kernel::server::{ModuleError, ModuleRegistry};
use std::sync::Arc;

pub mod server {
    pub mod router {
        pub use gantry_kernel::server::router::system_router;
    }
}

/// Module registry for runtime introspection.
pub mod modules {
    pub use gantry_billing as billing;
    pub use gantry_users as users;

    /// Modules compiled into this build.
    pub const ENABLED: &[&str] =
        &[gantry_domain::constants::USERS, gantry_domain::constants::BILLING];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Builds a fresh registry holding every module enabled by the configuration.
///
/// # Errors
/// Returns an error if any module registration fails. Duplicate or blank module
/// names are startup wiring defects; the caller must treat them as fatal and
/// abort the bootstrap rather than recover.
pub fn init(config: &ApiConfig) -> Result<ModuleRegistry, ModuleError> {
    let enabled = ModuleSet::from_names(&config.modules.enabled);
    let registry = ModuleRegistry::new();

    // Users
    if enabled.contains(ModuleSet::USERS) {
        registry.register(Arc::new(modules::users::Users::new()))?;
    }

    // Billing
    if enabled.contains(ModuleSet::BILLING) {
        registry.register(Arc::new(modules::billing::Billing::new()))?;
    }

    tracing::debug!(count = registry.len(), "Module registry assembled");

    Ok(registry)
}
