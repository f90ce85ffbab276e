use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Settings used to build an [`Authenticator`].
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HMAC signing secret
    pub secret: String,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Argon2 time cost
    pub hash_cost: u32,
    /// Issuer label embedded in tokens
    pub issuer: String,
}

/// Authentication coordinator combining password verification and JWT handling.
///
/// Also implements the bearer-token gate used in front of protected routes.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    decoy_hash: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

/// Authorization gate errors.
///
/// `client_message` is what leaves the process; `Display` keeps the cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Authorization header is not of the form 'Bearer <token>'")]
    BadFormat,

    #[error("Token rejected: {0}")]
    InvalidToken(#[from] JwtError),
}

impl AuthorizationError {
    /// Message safe to return to the client.
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthorizationError::MissingCredential => "missing credential",
            AuthorizationError::BadFormat => "bad format",
            AuthorizationError::InvalidToken(_) => "invalid or expired",
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// Hashes a throwaway password once so that logins for unknown accounts
    /// can be answered after the same amount of work as real ones.
    ///
    /// # Errors
    /// * `PasswordError` - Hash cost is invalid or hashing failed
    pub fn new(settings: AuthSettings) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new(settings.hash_cost)?;
        let decoy_hash = password_hasher.hash("decoy-password-for-unknown-accounts")?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(
                settings.secret.as_bytes(),
                settings.issuer,
                settings.token_ttl,
            ),
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against the stored hash of an account.
    ///
    /// `stored_hash` is `None` when no account matched; the outcome is then
    /// the same `InvalidCredentials` a wrong password produces.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password does not match
    /// * `PasswordError` - Stored hash is corrupt
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let Some(stored_hash) = stored_hash else {
            let _ = self.password_hasher.verify(password, &self.decoy_hash);
            return Err(AuthenticationError::InvalidCredentials);
        };

        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue a session token for a user.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(user_id, username, email, now)
    }

    /// Validate a session token at instant `now`.
    ///
    /// # Errors
    /// * `JwtError` - Token validation failed (see [`JwtHandler::verify`])
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token, now)
    }

    /// Authorize a request from its raw `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization_header` - Header value, `None` when absent
    /// * `now` - Instant the request is checked at
    ///
    /// # Errors
    /// * `MissingCredential` - No header, or an empty one
    /// * `BadFormat` - Header is not exactly `Bearer <token>`
    /// * `InvalidToken` - Token failed verification
    pub fn authorize(
        &self,
        authorization_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Claims, AuthorizationError> {
        let header = authorization_header
            .filter(|header| !header.is_empty())
            .ok_or(AuthorizationError::MissingCredential)?;
        let token = bearer_token(header)?;

        Ok(self.validate_token(token, now)?)
    }
}

fn bearer_token(header: &str) -> Result<&str, AuthorizationError> {
    let mut parts = header.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthorizationError::BadFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(AuthSettings {
            secret: "test_secret_key_at_least_32_bytes!".to_string(),
            token_ttl: Duration::hours(1),
            hash_cost: 1,
            issuer: "todo-api".to_string(),
        })
        .expect("Failed to build authenticator")
    }

    #[test]
    fn test_verify_credentials_success() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("longenough1").unwrap();

        assert!(authenticator
            .verify_credentials("longenough1", Some(&hash))
            .is_ok());
    }

    #[test]
    fn test_unknown_account_and_wrong_password_look_the_same() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("longenough1").unwrap();

        let wrong_password = authenticator
            .verify_credentials("wrong_password", Some(&hash))
            .unwrap_err();
        let unknown_account = authenticator
            .verify_credentials("longenough1", None)
            .unwrap_err();

        assert!(matches!(
            wrong_password,
            AuthenticationError::InvalidCredentials
        ));
        assert!(matches!(
            unknown_account,
            AuthenticationError::InvalidCredentials
        ));
        assert_eq!(wrong_password.to_string(), unknown_account.to_string());
    }

    #[test]
    fn test_verify_credentials_corrupt_hash() {
        let authenticator = authenticator();

        let result = authenticator.verify_credentials("longenough1", Some("not-a-phc-string"));
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(_))
        ));
    }

    #[test]
    fn test_authorize_valid_token() {
        let authenticator = authenticator();
        let now = Utc::now();
        let token = authenticator
            .issue_token(1, "alice", "a@x.com", now)
            .unwrap();

        let claims = authenticator
            .authorize(Some(&format!("Bearer {}", token)), now)
            .expect("Authorization failed");

        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_authorize_missing_header() {
        let result = authenticator().authorize(None, Utc::now());
        assert_eq!(result, Err(AuthorizationError::MissingCredential));
    }

    #[test]
    fn test_authorize_empty_header_counts_as_missing() {
        let err = authenticator().authorize(Some(""), Utc::now()).unwrap_err();

        assert_eq!(err, AuthorizationError::MissingCredential);
        assert_eq!(err.client_message(), "missing credential");
    }

    #[test]
    fn test_authorize_bad_format() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_token(1, "alice", "a@x.com", Utc::now())
            .unwrap();

        for header in [
            "Basic xyz".to_string(),
            "Bearer".to_string(),
            "Bearer ".to_string(),
            "bearer abc".to_string(),
            token.clone(),
            format!("Bearer {} extra", token),
            format!("Bearer  {}", token),
        ] {
            assert_eq!(
                authenticator.authorize(Some(&header), Utc::now()),
                Err(AuthorizationError::BadFormat),
                "header {:?}",
                header
            );
        }
    }

    #[test]
    fn test_authorize_garbage_token() {
        let result = authenticator().authorize(Some("Bearer garbage"), Utc::now());

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            AuthorizationError::InvalidToken(JwtError::MalformedToken(_))
        ));
        assert_eq!(err.client_message(), "invalid or expired");
    }

    #[test]
    fn test_authorize_expired_token_hides_cause() {
        let authenticator = authenticator();
        let issued = Utc::now() - Duration::hours(2);
        let token = authenticator
            .issue_token(1, "alice", "a@x.com", issued)
            .unwrap();

        let err = authenticator
            .authorize(Some(&format!("Bearer {}", token)), Utc::now())
            .unwrap_err();

        assert_eq!(
            err,
            AuthorizationError::InvalidToken(JwtError::TokenExpired)
        );
        assert_eq!(err.client_message(), "invalid or expired");
    }
}
