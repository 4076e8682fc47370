//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Credential digests (deterministic MD5, compatibility format)
//! - JWT access token generation and validation
//! - Opaque access token generation
//!
//! Each service defines its own authentication traits and adapts these
//! implementations. This avoids coupling services through shared domain logic
//! while reducing code duplication.
//!
//! # Examples
//!
//! ## Credential Digests
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password");
//! assert!(hasher.verify("my_password", &digest));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::AccessClaims;
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = AccessClaims::for_user("user123", "alice".to_string(), Duration::hours(2));
//! let token = handler.encode(&claims).unwrap();
//! let decoded: AccessClaims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Opaque Tokens
//! ```
//! let token = auth::opaque::generate_token();
//! assert_eq!(token.len(), 64);
//! ```

pub mod jwt;
pub mod opaque;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordHasher;
