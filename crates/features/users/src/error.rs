use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;

/// A specialized [`UsersError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum UsersError {
    /// Lookup of a login that does not exist.
    #[error("User not found: {login}")]
    NotFound { login: String },
    /// Attempt to create a user under a taken login.
    #[error("User already exists: {login}")]
    AlreadyExists { login: String },
    /// Malformed payload (e.g. blank login).
    #[error("Invalid user payload: {message}")]
    InvalidPayload { message: Cow<'static, str> },
    /// The module is not present in the server state.
    #[error("Users module is not registered")]
    ModuleUnavailable,
}

impl UsersError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::InvalidPayload { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ModuleUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
