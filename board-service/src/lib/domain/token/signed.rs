use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::JwtHandler;
use chrono::Duration;

use crate::domain::token::require_token;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::TokenAuthenticator;
use crate::user::ports::UserStore;

/// Signed-token strategy: self-contained JWTs.
///
/// Issued tokens carry their subject, username, and expiry under an HS256
/// signature; nothing is persisted at issuance, so every token issued for
/// a user stays valid until its own expiry. Verification decodes the
/// claims and then resolves the subject against the store, which rejects
/// tokens whose user has been deleted since issuance.
pub struct SignedTokenAuthenticator<S>
where
    S: UserStore,
{
    store: Arc<S>,
    codec: JwtHandler,
    validity: Duration,
}

impl<S> SignedTokenAuthenticator<S>
where
    S: UserStore,
{
    /// Create the signed-token strategy.
    ///
    /// # Arguments
    /// * `store` - User store used to resolve token subjects
    /// * `secret` - HS256 signing secret, at least 32 bytes
    /// * `validity` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `Internal` - Secret is shorter than the HS256 minimum
    pub fn new(store: Arc<S>, secret: &[u8], validity: Duration) -> Result<Self, AuthError> {
        let codec = JwtHandler::new(secret).map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self {
            store,
            codec,
            validity,
        })
    }
}

#[async_trait]
impl<S> TokenAuthenticator for SignedTokenAuthenticator<S>
where
    S: UserStore,
{
    async fn issue(&self, user: &User) -> Result<String, AuthError> {
        let claims =
            AccessClaims::for_user(user.id, user.username.as_str().to_string(), self.validity);

        self.codec
            .encode(&claims)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn verify(&self, token: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let token = require_token(token)?;

        // One generic failure for malformed, forged, and expired tokens
        let claims: AccessClaims = self
            .codec
            .decode(token)
            .map_err(|_| AuthError::InvalidToken)?;
        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .store
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserGone)?;

        Ok(AuthenticatedUser::from_user(&user))
    }
}
