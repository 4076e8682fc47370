use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an issued access token.
///
/// Every token this library issues names a subject, the username at
/// issuance time, and an expiry. `iat` and `exp` are Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for user authentication with automatic expiration.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username at issuance
    /// * `validity` - Window after which the token expires
    ///
    /// # Returns
    /// Claims with sub, username, iat, and exp set
    pub fn for_user(user_id: impl ToString, username: String, validity: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + validity;

        Self {
            sub: user_id.to_string(),
            username,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
