use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::errors::AuthError;
use crate::domain::user::errors::CredentialStoreError;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::Credential;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewCredential;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for authentication operations consumed by request handling.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Role, validated username, and plaintext password
    ///
    /// # Returns
    /// Identifier assigned by the credential store
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `Storage` - Persistence failed, including a duplicate username
    /// * `Internal` - Password hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Verify credentials and issue a fresh token pair.
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this username
    /// * `IncorrectPassword` - Password does not match
    /// * `CorruptCredential` - Stored hash cannot be parsed
    /// * `Storage` - Lookup failed
    /// * `Internal` - Token generation failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Exchange a valid refresh token for a new token pair.
    ///
    /// # Errors
    /// * `ExpiredRefreshToken` - Refresh token has expired
    /// * `MalformedToken` - Token cannot be parsed
    /// * `InvalidSignature` - Token was not issued as a refresh token by this service
    /// * `Internal` - Token generation failed
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Verify an access token and return the caller's identity.
    ///
    /// # Errors
    /// * `ExpiredAccessToken` - Access token has expired
    /// * `MalformedToken` - Token cannot be parsed
    /// * `InvalidSignature` - Token was not issued as an access token by this service
    async fn check_access(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Persistence operations for credential records.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve credential by username.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialStoreError>;

    /// Persist a new credential.
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `Database` - Database operation failed
    async fn insert(&self, credential: NewCredential) -> Result<UserId, CredentialStoreError>;
}

/// Source of the current instant for token issuance and verification.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
