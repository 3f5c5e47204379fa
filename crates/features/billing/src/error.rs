use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A specialized [`BillingError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// Lookup of an account that does not exist.
    #[error("Billing account not found: {id}")]
    AccountNotFound { id: String },
    /// Charge with a non-positive amount.
    #[error("Invalid charge amount: {amount_cents}")]
    InvalidAmount { amount_cents: i64 },
    /// The module is not present in the server state.
    #[error("Billing module is not registered")]
    ModuleUnavailable,
}

impl BillingError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::AccountNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidAmount { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ModuleUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
