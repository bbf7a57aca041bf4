use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use auth::PasswordError;
use auth::TokenKind;

use crate::domain::user::errors::AuthError;
use crate::domain::user::errors::CredentialStoreError;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewCredential;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::Clock;
use crate::domain::user::ports::CredentialRepository;

/// Domain service implementation for authentication.
///
/// Stateless apart from its injected dependencies: tokens are never stored,
/// so concurrent requests need no coordination here.
pub struct AuthService<CR, C>
where
    CR: CredentialRepository,
    C: Clock,
{
    repository: Arc<CR>,
    clock: Arc<C>,
    authenticator: Arc<Authenticator>,
}

impl<CR, C> AuthService<CR, C>
where
    CR: CredentialRepository,
    C: Clock,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `clock` - Time source for issuing and verifying tokens
    /// * `authenticator` - Password hasher and token codec configured with secrets and lifetimes
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(repository: Arc<CR>, clock: Arc<C>, authenticator: Authenticator) -> Self {
        Self {
            repository,
            clock,
            authenticator: Arc::new(authenticator),
        }
    }

    /// Register the account unless its username is already taken.
    ///
    /// Used at start-up to provision the first director.
    ///
    /// # Returns
    /// The new user's id, or `None` when the account already existed
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `Storage` - Lookup or persistence failed
    /// * `Internal` - Password hashing failed
    pub async fn ensure_account(
        &self,
        command: RegisterCommand,
    ) -> Result<Option<UserId>, AuthError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Account already provisioned");
            return Ok(None);
        }

        match self.register(command).await {
            Ok(user_id) => Ok(Some(user_id)),
            // Lost a race with a concurrent registration of the same name
            Err(AuthError::Storage(CredentialStoreError::UsernameTaken(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Run CPU-bound password work off the async worker threads.
    async fn run_blocking<T, F>(&self, task: F) -> Result<T, AuthError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || task(&authenticator))
            .await
            .map_err(|e| AuthError::Internal(format!("Blocking task failed: {}", e)))
    }
}

/// Map a token verification failure, reporting expiry with the kind-specific variant.
fn token_error(error: JwtError, expired: AuthError) -> AuthError {
    match error {
        JwtError::Expired => expired,
        JwtError::Malformed(msg) => AuthError::MalformedToken(msg),
        JwtError::InvalidSignature => AuthError::InvalidSignature,
        other => AuthError::Internal(other.to_string()),
    }
}

#[async_trait]
impl<CR, C> AuthServicePort for AuthService<CR, C>
where
    CR: CredentialRepository,
    C: Clock,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        let RegisterCommand {
            role,
            username,
            password,
        } = command;

        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let password_hash = self
            .run_blocking(move |authenticator| authenticator.hash_password(&password))
            .await?
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let user_id = self
            .repository
            .insert(NewCredential {
                role,
                username: username.clone(),
                password_hash,
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            username = %username,
            role = %role,
            "User registered"
        );

        Ok(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        let credential = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(command.username.to_string()))?;

        let subject = AuthenticatedUser::from(&credential);
        let now = self.clock.now();
        let password = command.password;
        let stored_hash = credential.password_hash;
        let tokens = self
            .run_blocking(move |authenticator| {
                authenticator.authenticate(&password, &stored_hash, &subject, now)
            })
            .await?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::IncorrectPassword,
                AuthenticationError::PasswordError(PasswordError::CorruptHash(msg)) => {
                    AuthError::CorruptCredential(msg)
                }
                AuthenticationError::PasswordError(err) => {
                    AuthError::Internal(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    AuthError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(user_id = %subject.user_id, role = %subject.role, "User logged in");

        Ok(tokens)
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();

        // Claims are reissued as embedded; the credential store is not consulted.
        let subject: AuthenticatedUser = self
            .authenticator
            .validate_token(TokenKind::Refresh, refresh_token, now)
            .map_err(|e| token_error(e, AuthError::ExpiredRefreshToken))?;

        let tokens = self
            .authenticator
            .issue_pair(&subject, now)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!(user_id = %subject.user_id, "Tokens refreshed");

        Ok(tokens)
    }

    async fn check_access(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.authenticator
            .validate_token(TokenKind::Access, access_token, self.clock.now())
            .map_err(|e| token_error(e, AuthError::ExpiredAccessToken))
    }
}
