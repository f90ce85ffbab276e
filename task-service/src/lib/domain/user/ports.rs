use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for registration, login and request authorization.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username, email and password
    ///
    /// # Returns
    /// Created user entity with its allocated identifier
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Hashing failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check an email and password pair.
    ///
    /// # Returns
    /// The matching user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishable
    async fn login(&self, command: LoginCommand) -> Result<User, UserError>;

    /// Issue a session token for `user` at instant `now`.
    ///
    /// # Errors
    /// * `Token` - Signing failed
    fn issue_token(&self, user: &User, now: DateTime<Utc>) -> Result<String, UserError>;

    /// Gate a request on its `Authorization` header value.
    ///
    /// # Errors
    /// * `MissingCredential` - No header
    /// * `BadFormat` - Header is not `Bearer <token>`
    /// * `InvalidToken` - Token failed verification
    fn authorize(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedUser, auth::AuthorizationError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and allocate its identifier.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
