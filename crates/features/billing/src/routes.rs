use crate::{Account, Billing, BillingError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use gantry_domain::constants::{BILLING, BILLING_TAG};
use gantry_kernel::prelude::ApiState;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_accounts, open_account))
        .routes(routes!(get_account))
        .routes(routes!(post_charge))
}

fn module(state: &ApiState) -> Result<Arc<Billing>, BillingError> {
    state.try_module::<Billing>(BILLING).map_err(|_| BillingError::ModuleUnavailable)
}

/// New ledger account
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct OpenAccount {
    /// Unique account id
    id: String,
    /// Owning party
    owner: String,
}

/// Charge posted against an account
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ChargeRequest {
    /// Amount in cents, strictly positive
    amount_cents: i64,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = OK, description = "All ledger accounts", body = [Account])),
    tag = BILLING_TAG,
)]
async fn list_accounts(State(state): State<ApiState>) -> Result<Json<Vec<Account>>, BillingError> {
    Ok(Json(module(&state)?.list()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = OK, description = "Ledger account", body = Account),
        (status = NOT_FOUND, description = "No such account"),
    ),
    tag = BILLING_TAG,
)]
async fn get_account(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, BillingError> {
    module(&state)?.get(&id).map(Json).ok_or(BillingError::AccountNotFound { id })
}

#[utoipa::path(
    post,
    path = "/",
    request_body = OpenAccount,
    responses((status = CREATED, description = "Account opened", body = Account)),
    tag = BILLING_TAG,
)]
async fn open_account(
    State(state): State<ApiState>,
    Json(payload): Json<OpenAccount>,
) -> Result<(StatusCode, Json<Account>), BillingError> {
    let account = module(&state)?.open(&payload.id, &payload.owner);
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    post,
    path = "/{id}/charges",
    params(("id" = String, Path, description = "Account id")),
    request_body = ChargeRequest,
    responses(
        (status = OK, description = "Updated account", body = Account),
        (status = NOT_FOUND, description = "No such account"),
        (status = UNPROCESSABLE_ENTITY, description = "Non-positive amount"),
    ),
    tag = BILLING_TAG,
)]
async fn post_charge(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(payload): Json<ChargeRequest>,
) -> Result<Json<Account>, BillingError> {
    let account = module(&state)?.charge(&id, payload.amount_cents)?;
    Ok(Json(account))
}
