pub mod login;
pub mod register;
pub mod whoami;

// Re-export handlers for easy access
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
pub use login::login;
pub use register::register;
use serde::Serialize;
use thiserror::Error;
pub use whoami::whoami;

use crate::domain::user::models::TokenGrant;
use crate::user::errors::AuthError;

/// Standardized API success response with a flat JSON body
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        // Failures reach the wire as a bare {"message": ...} object
        let body = Json(serde_json::json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential
            | AuthError::InvalidToken
            | AuthError::UserGone
            | AuthError::WrongPassword => ApiError::Unauthorized(err.to_string()),
            AuthError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AuthError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidUsername(_) | AuthError::InvalidUserId(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthError::DatabaseError(msg) | AuthError::Internal(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

/// Response DTO shared by the register and login endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenGrantData {
    pub username: String,
    pub token: String,
}

impl From<&TokenGrant> for TokenGrantData {
    fn from(grant: &TokenGrant) -> Self {
        Self {
            username: grant.username.clone(),
            token: grant.token.clone(),
        }
    }
}
