pub mod opaque;
pub mod signed;

pub use opaque::OpaqueTokenAuthenticator;
pub use signed::SignedTokenAuthenticator;

use crate::user::errors::AuthError;

/// Reject absent or blank credentials before any decode or store lookup.
///
/// Both strategies share this guard so that "nothing was presented" stays
/// distinct from "something invalid was presented".
pub(crate) fn require_token(token: Option<&str>) -> Result<&str, AuthError> {
    match token {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(AuthError::MissingCredential),
    }
}
