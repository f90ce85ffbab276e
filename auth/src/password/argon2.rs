use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a tunable time cost. Memory and parallelism stay at the
/// argon2 crate defaults.
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the given time cost (Argon2 iterations).
    ///
    /// # Arguments
    /// * `cost` - Number of Argon2 passes over memory, at least 1
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside the range accepted by Argon2
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self { params })
    }

    /// Configured time cost.
    pub fn cost(&self) -> u32 {
        self.params.t_cost()
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Parameters are read from the stored hash, so hashes produced under an
    /// older cost keep verifying. The digest comparison is constant-time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash is not a parseable PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(1).expect("Failed to build hasher");
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_gets_fresh_salt() {
        let hasher = PasswordHasher::new(1).expect("Failed to build hasher");

        let first = hasher.hash("longenough1").unwrap();
        let second = hasher.hash("longenough1").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hasher = PasswordHasher::new(3).expect("Failed to build hasher");
        let hash = hasher.hash("longenough1").unwrap();

        assert_eq!(hasher.cost(), 3);
        assert!(hash.contains("t=3"));
    }

    #[test]
    fn test_verify_hash_from_other_cost() {
        let old = PasswordHasher::new(1).unwrap();
        let new = PasswordHasher::new(2).unwrap();

        let hash = old.hash("longenough1").unwrap();

        assert!(new.verify("longenough1", &hash).unwrap());
    }

    #[test]
    fn test_zero_cost_rejected() {
        let result = PasswordHasher::new(0);
        assert!(matches!(result, Err(PasswordError::InvalidCost(_))));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new(1).unwrap();
        let result = hasher.verify("password", "invalid_hash");
        assert!(result.is_err());
    }
}
