use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for Role decoding failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role code: {0}")]
    UnknownCode(i16),
}

/// Failures reported by the credential store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialStoreError {
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for registration, login, refresh, and access checks
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Password must not be empty")]
    EmptyPassword,

    // Credential errors
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Stored credential is corrupt: {0}")]
    CorruptCredential(String),

    // Token errors
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Expired access token")]
    ExpiredAccessToken,

    #[error("Expired refresh token")]
    ExpiredRefreshToken,

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(#[from] CredentialStoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}
