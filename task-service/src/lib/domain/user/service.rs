use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::AuthorizationError;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service for registration, login and request authorization.
///
/// Password hashing runs on the blocking thread pool.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password and token core
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))??;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<User, UserError> {
        let user = self.repository.find_by_email(&command.email).await?;

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password = command.password;
        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.verify_credentials(&password, stored_hash.as_deref())
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))?;

        match (outcome, user) {
            (Ok(()), Some(user)) => {
                tracing::debug!(user_id = %user.id, "Login succeeded");
                Ok(user)
            }
            (Err(AuthenticationError::PasswordError(e)), Some(user)) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Err(UserError::InvalidCredentials)
            }
            _ => {
                tracing::debug!("Login rejected");
                Err(UserError::InvalidCredentials)
            }
        }
    }

    fn issue_token(&self, user: &User, now: DateTime<Utc>) -> Result<String, UserError> {
        let token = self.authenticator.issue_token(
            user.id.as_i64(),
            user.username.as_str(),
            user.email.as_str(),
            now,
        )?;

        Ok(token)
    }

    fn authorize(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedUser, AuthorizationError> {
        self.authenticator
            .authorize(header, now)
            .map(AuthenticatedUser::from)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}
