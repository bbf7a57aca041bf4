use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::jwt::JwtError;

/// Purpose a token was issued for.
///
/// Each kind is signed with its own secret, so a token of one kind never
/// verifies as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Signed token payload.
///
/// Generic over the subject so each service decides which identity fields it
/// embeds. The subject's fields are flattened next to the registered claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims<S> {
    #[serde(flatten)]
    pub subject: S,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl<S> Claims<S> {
    /// Create claims issued at `now` and expiring after `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity embedded in the token
    /// * `now` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with exp, iat, and a fresh jti set. A fractional expiry
    /// second is rounded up, so a token never expires before `now + ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable range
    pub fn issue(subject: S, now: DateTime<Utc>, ttl: Duration) -> Result<Self, JwtError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("Token lifetime {} overflows expiry", ttl))
        })?;
        let exp = match expires_at.timestamp_subsec_nanos() {
            0 => expires_at.timestamp(),
            _ => expires_at.timestamp() + 1,
        };

        Ok(Self {
            subject,
            exp,
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Check if the token is expired at the given instant.
    ///
    /// A token is only valid while its expiration is strictly in the future.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}
