use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct UserStore {
    users: HashMap<UserId, User>,
    ids_by_email: HashMap<String, UserId>,
    ids_by_username: HashMap<String, UserId>,
    last_id: i64,
}

/// Process-local user store.
///
/// Identifiers are allocated from 1. Uniqueness of email and username is
/// checked and recorded under the same write lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<UserStore>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.store.read().await.users.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut store = self.store.write().await;

        if store.ids_by_email.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        if store.ids_by_username.contains_key(user.username.as_str()) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        store.last_id += 1;
        let id = UserId(store.last_id);
        let created = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };

        store
            .ids_by_email
            .insert(created.email.as_str().to_string(), id);
        store
            .ids_by_username
            .insert(created.username.as_str().to_string(), id);
        store.users.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let store = self.store.read().await;

        Ok(store
            .ids_by_email
            .get(email)
            .and_then(|id| store.users.get(id))
            .cloned())
    }
}
