//! Authentication utilities library
//!
//! Provides the authentication core used by the task service:
//! - Password hashing (Argon2id, tunable cost)
//! - Stateless session tokens (HS256 JWT) with caller-supplied clock
//! - Authentication coordination and the bearer-token gate
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", "todo-api", Duration::hours(24));
//! let now = Utc::now();
//! let token = handler.issue(1, "alice", "a@x.com", now).unwrap();
//! let claims = handler.verify(&token, now).unwrap();
//! assert_eq!(claims.user_id, 1);
//! ```
//!
//! ## Request Authorization
//! ```
//! use auth::{AuthSettings, Authenticator};
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(AuthSettings {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     token_ttl: Duration::hours(24),
//!     hash_cost: 1,
//!     issuer: "todo-api".to_string(),
//! })
//! .unwrap();
//!
//! let now = Utc::now();
//! let token = auth.issue_token(1, "alice", "a@x.com", now).unwrap();
//! let claims = auth.authorize(Some(&format!("Bearer {}", token)), now).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthSettings;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::AuthorizationError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
