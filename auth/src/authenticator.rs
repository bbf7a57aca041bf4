use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and the access/refresh token codec.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    lifetimes: TokenLifetimes,
}

/// Lifetimes applied when issuing a token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    /// Longest lifetime accepted for either token kind.
    pub const MAX: Duration = Duration::days(3650);

    /// Create validated lifetimes.
    ///
    /// # Errors
    /// * `InvalidLifetime` - A lifetime is zero, negative, or longer than [`TokenLifetimes::MAX`]
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, JwtError> {
        let lifetimes = Self { access, refresh };
        lifetimes.validate()?;
        Ok(lifetimes)
    }

    fn validate(&self) -> Result<(), JwtError> {
        for (kind, ttl) in [(TokenKind::Access, self.access), (TokenKind::Refresh, self.refresh)] {
            if ttl <= Duration::zero() {
                return Err(JwtError::InvalidLifetime(format!(
                    "{} token lifetime must be positive, got {}",
                    kind, ttl
                )));
            }
            if ttl > Self::MAX {
                return Err(JwtError::InvalidLifetime(format!(
                    "{} token lifetime {} exceeds {}",
                    kind,
                    ttl,
                    Self::MAX
                )));
            }
        }
        Ok(())
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::hours(720),
        }
    }
}

/// Access and refresh token issued together for the same subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `access_secret` - Secret key for access token signing
    /// * `refresh_secret` - Secret key for refresh token signing, distinct from the access secret
    /// * `lifetimes` - Access and refresh token lifetimes
    ///
    /// # Returns
    /// Configured Authenticator instance
    ///
    /// # Errors
    /// * `InvalidSecret` - A secret is empty or the secrets are identical
    /// * `InvalidLifetime` - A lifetime is out of range
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        lifetimes: TokenLifetimes,
    ) -> Result<Self, JwtError> {
        lifetimes.validate()?;

        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(access_secret, refresh_secret)?,
            lifetimes,
        })
    }

    /// Configured token lifetimes.
    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity claims to embed in both tokens
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// Fresh access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is corrupt
    /// * `JwtError` - Token generation failed
    pub fn authenticate<S: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &S,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => return Err(AuthenticationError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        }

        Ok(self.issue_pair(subject, now)?)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used by the refresh flow, where possession of a valid refresh
    /// token stands in for the password.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_pair<S: Serialize>(
        &self,
        subject: &S,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, JwtError> {
        let access_token =
            self.token_codec
                .issue(TokenKind::Access, subject, now, self.lifetimes.access)?;
        let refresh_token =
            self.token_codec
                .issue(TokenKind::Refresh, subject, now, self.lifetimes.refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate a token of the given kind and decode its subject.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `InvalidSignature` - Token was not signed for this kind by this service
    /// * `Expired` - Token expired before `now`
    pub fn validate_token<S: DeserializeOwned>(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<S, JwtError> {
        self.token_codec.verify(kind, token, now)
    }
}
