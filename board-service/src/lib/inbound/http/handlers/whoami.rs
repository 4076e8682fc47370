use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthenticatedUser;

/// Return the identity the authentication middleware resolved for this
/// request.
pub async fn whoami(
    Extension(identity): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<WhoamiResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&identity).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoamiResponseData {
    pub id: String,
    pub username: String,
}

impl From<&AuthenticatedUser> for WhoamiResponseData {
    fn from(identity: &AuthenticatedUser) -> Self {
        Self {
            id: identity.id.to_string(),
            username: identity.username.clone(),
        }
    }
}
