use crate::{User, Users, UsersError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use gantry_domain::constants::{USERS, USERS_TAG};
use gantry_kernel::prelude::ApiState;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub(crate) fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(list_users, create_user)).routes(routes!(get_user))
}

fn module(state: &ApiState) -> Result<Arc<Users>, UsersError> {
    state.try_module::<Users>(USERS).map_err(|_| UsersError::ModuleUnavailable)
}

/// New directory entry
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateUser {
    /// Unique login
    login: String,
    /// Human-readable name
    display_name: String,
    /// Administrative account flag
    #[serde(default)]
    admin: bool,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = OK, description = "All directory entries", body = [User])),
    tag = USERS_TAG,
)]
async fn list_users(State(state): State<ApiState>) -> Result<Json<Vec<User>>, UsersError> {
    Ok(Json(module(&state)?.list()))
}

#[utoipa::path(
    get,
    path = "/{login}",
    params(("login" = String, Path, description = "User login")),
    responses(
        (status = OK, description = "Directory entry", body = User),
        (status = NOT_FOUND, description = "No such user"),
    ),
    tag = USERS_TAG,
)]
async fn get_user(
    State(state): State<ApiState>,
    Path(login): Path<String>,
) -> Result<Json<User>, UsersError> {
    module(&state)?.get(&login).map(Json).ok_or(UsersError::NotFound { login })
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CreateUser,
    responses(
        (status = CREATED, description = "User created", body = User),
        (status = CONFLICT, description = "Login already taken"),
        (status = UNPROCESSABLE_ENTITY, description = "Malformed payload"),
    ),
    tag = USERS_TAG,
)]
async fn create_user(
    State(state): State<ApiState>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), UsersError> {
    let user = User {
        login: payload.login,
        display_name: payload.display_name,
        admin: payload.admin,
    };

    module(&state)?.insert(user.clone())?;
    Ok((StatusCode::CREATED, Json(user)))
}
