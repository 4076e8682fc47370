use async_trait::async_trait;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenGrant;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::models::Username;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and grant a first access token.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username and password
    ///
    /// # Returns
    /// Token grant with the username and the issued access token
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Store operation failed
    /// * `Internal` - Token issuance failed
    async fn register(&self, command: RegisterCommand) -> Result<TokenGrant, AuthError>;

    /// Authenticate an existing user and grant a fresh access token.
    ///
    /// # Arguments
    /// * `command` - Command containing username and password
    ///
    /// # Returns
    /// Token grant with the username and the issued access token
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `WrongPassword` - Password does not hash to the stored digest
    /// * `DatabaseError` - Store operation failed
    /// * `Internal` - Token issuance failed
    async fn login(&self, command: LoginCommand) -> Result<TokenGrant, AuthError>;
}

/// Token issuance and verification strategy.
///
/// Implementations define what an access token is: a signed claims
/// document or an opaque stored value. A running process uses exactly one
/// implementation, chosen from configuration at startup.
#[async_trait]
pub trait TokenAuthenticator: Send + Sync + 'static {
    /// Issue an access token for a user.
    ///
    /// Opaque implementations also persist the token as the user's
    /// current one, superseding any earlier token.
    ///
    /// # Arguments
    /// * `user` - User the token is issued for
    ///
    /// # Returns
    /// Token string for the wire
    ///
    /// # Errors
    /// * `DatabaseError` - Persisting the token failed
    /// * `Internal` - Token encoding failed
    async fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// Verify a presented token and resolve the identity behind it.
    ///
    /// # Arguments
    /// * `token` - Credential extracted from the request, if any
    ///
    /// # Returns
    /// Identity to attach to the request
    ///
    /// # Errors
    /// * `MissingCredential` - No token was presented (checked before any decode or lookup)
    /// * `InvalidToken` - Malformed, forged, expired, or unknown token
    /// * `UserGone` - Token checks out but its user has been deleted
    /// * `DatabaseError` - Store lookup failed
    async fn verify(&self, token: Option<&str>) -> Result<AuthenticatedUser, AuthError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve user by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Retrieve user by current opaque token.
    ///
    /// # Arguments
    /// * `token` - Exact token value to match
    ///
    /// # Returns
    /// Optional user entity (None if no user holds this token)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, AuthError>;

    /// Replace the user's current opaque token.
    ///
    /// Overwrites whatever token the user held before; last write wins.
    ///
    /// # Arguments
    /// * `id` - User whose token is replaced
    /// * `token` - New token value
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn save_token(&self, id: &UserId, token: &str) -> Result<(), AuthError>;
}
