//! Billing ledger module.

mod error;
mod routes;

pub use crate::error::BillingError;

use async_trait::async_trait;
use fxhash::FxHashMap;
use gantry_domain::constants::BILLING;
use gantry_kernel::prelude::{ApiState, Modular, ModuleError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

/// Account the migration seeds for internal settlement postings.
pub const SETTLEMENT_ACCOUNT: &str = "system";

/// A ledger account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Account {
    /// Unique account id
    pub id: String,
    /// Owning party
    pub owner: String,
    /// Outstanding balance in cents
    pub balance_cents: i64,
}

/// Billing ledger module state.
#[derive(Debug, Default)]
pub struct Billing {
    accounts: RwLock<FxHashMap<String, Account>>,
}

impl Billing {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn list(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.read().values().cloned().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    pub(crate) fn get(&self, id: &str) -> Option<Account> {
        self.accounts.read().get(id).cloned()
    }

    /// Opens an account with a zero balance, replacing nothing.
    pub(crate) fn open(&self, id: &str, owner: &str) -> Account {
        let mut accounts = self.accounts.write();
        accounts
            .entry(id.to_owned())
            .or_insert_with(|| Account {
                id: id.to_owned(),
                owner: owner.to_owned(),
                balance_cents: 0,
            })
            .clone()
    }

    /// Posts a charge against an account and returns the updated record.
    ///
    /// # Errors
    /// Returns [`BillingError::InvalidAmount`] for non-positive amounts and
    /// [`BillingError::AccountNotFound`] for unknown accounts.
    pub(crate) fn charge(&self, id: &str, amount_cents: i64) -> Result<Account, BillingError> {
        if amount_cents <= 0 {
            return Err(BillingError::InvalidAmount { amount_cents });
        }

        let mut accounts = self.accounts.write();
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| BillingError::AccountNotFound { id: id.to_owned() })?;
        account.balance_cents += amount_cents;
        Ok(account.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[async_trait]
impl Modular for Billing {
    fn name(&self) -> &'static str {
        BILLING
    }

    async fn init(&self) -> Result<(), ModuleError> {
        tracing::info!(accounts = self.len(), "Billing module initialized");
        Ok(())
    }

    async fn auto_migrate(&self) -> Result<(), ModuleError> {
        if self.get(SETTLEMENT_ACCOUNT).is_some() {
            tracing::debug!("Billing migration skipped, settlement account already present");
            return Ok(());
        }

        self.open(SETTLEMENT_ACCOUNT, "platform");
        tracing::info!("Billing migration applied, opened settlement account");
        Ok(())
    }

    async fn release(&self) -> Result<(), ModuleError> {
        self.accounts.write().clear();
        tracing::info!("Billing module released");
        Ok(())
    }

    fn register_routers(
        &self,
        version: &str,
        router: OpenApiRouter<ApiState>,
    ) -> Result<OpenApiRouter<ApiState>, ModuleError> {
        Ok(router.nest(&format!("/{version}/billing"), routes::router()))
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
