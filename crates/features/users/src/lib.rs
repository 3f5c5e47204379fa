//! User directory module: account records behind the platform module lifecycle.

mod error;
mod routes;

pub use crate::error::UsersError;

use async_trait::async_trait;
use fxhash::FxHashMap;
use gantry_domain::constants::USERS;
use gantry_kernel::prelude::{ApiState, Modular, ModuleError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

/// Login of the account seeded by the module migration.
pub const ADMIN_LOGIN: &str = "admin";

/// A directory entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique login
    pub login: String,
    /// Human-readable name
    pub display_name: String,
    /// Administrative account flag
    pub admin: bool,
}

/// User directory module state.
#[derive(Debug, Default)]
pub struct Users {
    store: RwLock<FxHashMap<String, User>>,
}

impl Users {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All directory entries, ordered by login for stable output.
    pub(crate) fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.store.read().values().cloned().collect();
        users.sort_by(|a, b| a.login.cmp(&b.login));
        users
    }

    pub(crate) fn get(&self, login: &str) -> Option<User> {
        self.store.read().get(login).cloned()
    }

    /// Inserts a new entry.
    ///
    /// # Errors
    /// Returns [`UsersError::InvalidPayload`] for a blank login and
    /// [`UsersError::AlreadyExists`] when the login is taken.
    pub(crate) fn insert(&self, user: User) -> Result<(), UsersError> {
        if user.login.trim().is_empty() {
            return Err(UsersError::InvalidPayload { message: "login cannot be blank".into() });
        }

        let mut store = self.store.write();
        if store.contains_key(&user.login) {
            return Err(UsersError::AlreadyExists { login: user.login });
        }
        store.insert(user.login.clone(), user);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}

#[async_trait]
impl Modular for Users {
    fn name(&self) -> &'static str {
        USERS
    }

    async fn init(&self) -> Result<(), ModuleError> {
        tracing::info!(entries = self.len(), "Users module initialized");
        Ok(())
    }

    async fn auto_migrate(&self) -> Result<(), ModuleError> {
        let mut store = self.store.write();
        if store.contains_key(ADMIN_LOGIN) {
            tracing::debug!("Users migration skipped, built-in admin already present");
            return Ok(());
        }

        store.insert(
            ADMIN_LOGIN.to_owned(),
            User {
                login: ADMIN_LOGIN.to_owned(),
                display_name: "Administrator".to_owned(),
                admin: true,
            },
        );
        tracing::info!("Users migration applied, seeded built-in admin");
        Ok(())
    }

    async fn release(&self) -> Result<(), ModuleError> {
        self.store.write().clear();
        tracing::info!("Users module released");
        Ok(())
    }

    fn register_routers(
        &self,
        version: &str,
        router: OpenApiRouter<ApiState>,
    ) -> Result<OpenApiRouter<ApiState>, ModuleError> {
        Ok(router.nest(&format!("/{version}/users"), routes::router()))
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
