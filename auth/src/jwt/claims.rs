use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Session token claims.
///
/// Flat record of the user identity plus the registered RFC 7519 fields the
/// service relies on. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Numeric user identifier
    pub user_id: i64,

    /// Display name
    pub username: String,

    /// Email address as stored at registration
    pub email: String,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    pub iat: i64,

    /// Not before
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Subject (decimal form of `user_id`)
    pub sub: String,
}

impl Claims {
    /// Create claims for a user, valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Numeric user identifier
    /// * `username` - Display name
    /// * `email` - Email address
    /// * `issuer` - Issuer label
    /// * `issued_at` - Issuance instant (also used as not-before)
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry falls outside the representable time range
    pub fn for_user(
        user_id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let iat = issued_at.timestamp();
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::SigningFailed(format!("token lifetime {} overflows expiry", ttl))
        })?;

        Ok(Self {
            user_id,
            username: username.into(),
            email: email.into(),
            exp: expires_at.timestamp(),
            iat,
            nbf: iat,
            iss: issuer.into(),
            sub: user_id.to_string(),
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Check if token is used before its not-before time.
    pub fn is_premature(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.nbf
    }
}
