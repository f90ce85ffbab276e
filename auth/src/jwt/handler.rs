use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying session tokens.
///
/// Uses HS256 (HMAC with SHA-256). Tokens are stateless: validity is decided
/// by the signature and the embedded timestamps only.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    ttl: Duration,
    has_secret: bool,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `issuer` - Issuer label embedded in and required from every token
    /// * `ttl` - Lifetime of issued tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - An empty secret is accepted here but every `issue` call fails
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
            ttl,
            has_secret: !secret.is_empty(),
        }
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for a user.
    ///
    /// `iat` and `nbf` are set to `now`, `exp` to `now + ttl`.
    ///
    /// # Errors
    /// * `SigningFailed` - Secret is missing, expiry overflows or encoding failed
    pub fn issue(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_user(
            user_id,
            username,
            email,
            self.issuer.as_str(),
            now,
            self.ttl,
        )?;

        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        if !self.has_secret {
            return Err(JwtError::SigningFailed(
                "signing secret is not configured".to_string(),
            ));
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token at instant `now` and return its claims.
    ///
    /// The header algorithm is checked before the signature, and the
    /// signature before any claim is read.
    ///
    /// # Errors
    /// * `MalformedToken` - Token is not a well-formed JWT with the expected claims
    /// * `UnsupportedAlgorithm` - Header names an algorithm other than HS256
    /// * `InvalidSignature` - Signature does not match the configured secret
    /// * `InvalidIssuer` - Issuer differs from the configured label
    /// * `TokenNotYetValid` - `now` is before `nbf`
    /// * `TokenExpired` - `now` is after `exp`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let header = decode_header(token).map_err(|e| JwtError::MalformedToken(e.to_string()))?;

        if header.alg != self.algorithm {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
                ErrorKind::InvalidAlgorithm => {
                    JwtError::UnsupportedAlgorithm(format!("{:?}", header.alg))
                }
                _ => JwtError::MalformedToken(e.to_string()),
            })?
            .claims;

        let timestamp = now.timestamp();
        if claims.is_premature(timestamp) {
            return Err(JwtError::TokenNotYetValid);
        }
        if claims.is_expired(timestamp) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    // Time checks run against the caller's clock, not the library's.
    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation
    }
}
