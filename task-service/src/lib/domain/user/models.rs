use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered user. Never mutated after registration.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User about to be stored; the store allocates the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Display name of 3-50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
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
            Ok(Self(username))
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

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored exactly as
/// given; lookups are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration.
///
/// Between 8 and 128 characters. `Debug` never prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to log in.
///
/// Fields are raw: a malformed email or password is just a failed login.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

impl From<auth::Claims> for AuthenticatedUser {
    fn from(claims: auth::Claims) -> Self {
        Self {
            user_id: UserId(claims.user_id),
            username: claims.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(Username::new("al".to_string()).is_err());
        assert!(Username::new("ali".to_string()).is_ok());
        assert!(Username::new("a".repeat(50)).is_ok());
        assert_eq!(
            Username::new("a".repeat(51)),
            Err(UsernameError::TooLong {
                max: 50,
                actual: 51
            })
        );
    }

    #[test]
    fn test_email_is_kept_as_given() {
        let email = EmailAddress::new("Alice@X.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "Alice@X.com");

        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert_eq!(
            Password::new("short".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 8, actual: 5 }
        );
        assert!(Password::new("longenough1".to_string()).is_ok());
        assert!(Password::new("x".repeat(129)).is_err());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("longenough1".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");

        let command = LoginCommand {
            email: "a@x.com".to_string(),
            password: "longenough1".to_string(),
        };
        assert!(!format!("{:?}", command).contains("longenough1"));
    }
}
