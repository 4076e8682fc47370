use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::token::require_token;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::ports::TokenAuthenticator;
use crate::user::ports::UserStore;

/// Opaque-token strategy: random values resolved through the store.
///
/// Issuance draws a random token and persists it as the user's current
/// one, superseding whatever was there before; each user has at most one
/// live token. Verification is an exact-match store lookup, so tokens
/// never expire on their own and carry no readable claims.
pub struct OpaqueTokenAuthenticator<S>
where
    S: UserStore,
{
    store: Arc<S>,
}

impl<S> OpaqueTokenAuthenticator<S>
where
    S: UserStore,
{
    /// Create the opaque-token strategy.
    ///
    /// # Arguments
    /// * `store` - User store that holds the current token per user
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> TokenAuthenticator for OpaqueTokenAuthenticator<S>
where
    S: UserStore,
{
    async fn issue(&self, user: &User) -> Result<String, AuthError> {
        let token = auth::opaque::generate_token();
        self.store.save_token(&user.id, &token).await?;

        Ok(token)
    }

    async fn verify(&self, token: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let token = require_token(token)?;

        let user = self
            .store
            .find_by_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::from_user(&user))
    }
}
