//! Authentication utilities library
//!
//! Provides the credential and token primitives for the order service:
//! - Password hashing (Argon2id)
//! - Access and refresh token issuance and verification (HS256, one secret per kind)
//! - Authentication coordination
//!
//! Services define their own authentication ports and token subjects on top of these.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{JwtError, TokenCodec, TokenKind};
//! use chrono::{Duration, Utc};
//! use std::collections::HashMap;
//!
//! let codec = TokenCodec::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//! )
//! .unwrap();
//! let now = Utc::now();
//! let subject = HashMap::from([("user_id", "user123")]);
//! let token = codec
//!     .issue(TokenKind::Access, &subject, now, Duration::minutes(15))
//!     .unwrap();
//!
//! let decoded: HashMap<String, String> = codec.verify(TokenKind::Access, &token, now).unwrap();
//! assert_eq!(decoded["user_id"], "user123");
//!
//! // A refresh token never verifies as an access token
//! let refresh = codec
//!     .issue(TokenKind::Refresh, &subject, now, Duration::hours(720))
//!     .unwrap();
//! assert_eq!(
//!     codec.verify::<HashMap<String, String>>(TokenKind::Access, &refresh, now),
//!     Err(JwtError::InvalidSignature)
//! );
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenKind, TokenLifetimes};
//! use chrono::Utc;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Subject {
//!     user_id: String,
//! }
//!
//! let auth = Authenticator::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//!     TokenLifetimes::default(),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token pair
//! let now = Utc::now();
//! let subject = Subject { user_id: "user123".to_string() };
//! let pair = auth.authenticate("password123", &hash, &subject, now).unwrap();
//!
//! // Validate the access token
//! let decoded: Subject = auth
//!     .validate_token(TokenKind::Access, &pair.access_token, now)
//!     .unwrap();
//! assert_eq!(decoded.user_id, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
