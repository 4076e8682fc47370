use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenGrant;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::TokenAuthenticator;
use crate::user::ports::UserStore;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// The token strategy is injected as a trait object so the same service
/// runs unchanged under signed or opaque tokens.
pub struct AuthService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    tokens: Arc<dyn TokenAuthenticator>,
    password_hasher: auth::PasswordHasher,
}

impl<S> AuthService<S>
where
    S: UserStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `tokens` - Token issuance and verification strategy
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(store: Arc<S>, tokens: Arc<dyn TokenAuthenticator>) -> Self {
        Self {
            store,
            tokens,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: UserStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<TokenGrant, AuthError> {
        if let Some(existing) = self.store.find_by_username(&command.username).await? {
            return Err(AuthError::UsernameAlreadyExists(
                existing.username.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_digest: self.password_hasher.hash(&command.password),
            token: None,
            created_at: Utc::now(),
        };

        // The store re-checks uniqueness, so a racing duplicate still fails here
        let created_user = self.store.create(user).await?;
        let token = self.tokens.issue(&created_user).await?;

        Ok(TokenGrant {
            username: created_user.username.as_str().to_string(),
            token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenGrant, AuthError> {
        let user = self
            .store
            .find_by_username(&command.username)
            .await?
            .ok_or(AuthError::NotFound(command.username.to_string()))?;

        if !self
            .password_hasher
            .verify(&command.password, &user.password_digest)
        {
            return Err(AuthError::WrongPassword);
        }

        let token = self.tokens.issue(&user).await?;

        Ok(TokenGrant {
            username: user.username.as_str().to_string(),
            token,
        })
    }
}
