use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UsernameError;

pub use auth::TokenPair;

/// Stored credential record.
///
/// Created once at registration, never updated or deleted.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub role: Role,
    pub username: Username,
    pub password_hash: String,
}

/// Credential ready to be persisted; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub role: Role,
    pub username: Username,
    pub password_hash: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authorization role of an employee account.
///
/// Persisted as a small integer (`0` director, `1` employee).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Director,
    Employee,
}

impl Role {
    /// Numeric code used in storage and request bodies.
    pub fn code(&self) -> i16 {
        match self {
            Role::Director => 0,
            Role::Employee => 1,
        }
    }
}

impl TryFrom<i16> for Role {
    type Error = RoleError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Role::Director),
            1 => Ok(Role::Employee),
            other => Err(RoleError::UnknownCode(other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Director => f.write_str("director"),
            Role::Employee => f.write_str("employee"),
        }
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity carried by tokens and attached to authenticated requests.
///
/// Copied verbatim from the credential at issuance; downstream handlers
/// branch on `role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    #[serde(rename = "user_role")]
    pub role: Role,
}

impl From<&Credential> for AuthenticatedUser {
    fn from(credential: &Credential) -> Self {
        Self {
            user_id: credential.user_id,
            role: credential.role,
        }
    }
}

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub role: Role,
    pub username: Username,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(role: Role, username: Username, password: String) -> Self {
        Self {
            role,
            username,
            password,
        }
    }
}

/// Command to log in with a username and plaintext password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::try_from(0), Ok(Role::Director));
        assert_eq!(Role::try_from(1), Ok(Role::Employee));
        assert_eq!(Role::try_from(2), Err(RoleError::UnknownCode(2)));
        assert_eq!(Role::Director.code(), 0);
        assert_eq!(Role::Employee.code(), 1);
    }

    #[test]
    fn test_username_validation() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("bob_the-2nd".to_string()).is_ok());
        assert_eq!(
            Username::new("al".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong {
                max: 32,
                actual: 33
            })
        );
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_authenticated_user_serialization() {
        let user = AuthenticatedUser {
            user_id: UserId(Uuid::parse_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap()),
            role: Role::Employee,
        };

        let json = serde_json::to_value(user).unwrap();
        assert_eq!(json["user_id"], "6f9619ff-8b86-d011-b42d-00c04fc964ff");
        assert_eq!(json["user_role"], "employee");

        let back: AuthenticatedUser = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
