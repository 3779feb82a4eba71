//! User repository.

use startify_core::Username;

use super::{RepositoryError, Store};
use crate::models::User;

/// Repository for account operations.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is already taken.
    pub async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.store.users.write().await;

        if users.contains_key(&user.username) {
            return Err(RepositoryError::Conflict(format!(
                "username {} already exists",
                user.username
            )));
        }

        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    /// Get a user by username.
    pub async fn get(&self, username: &Username) -> Option<User> {
        self.store.users.read().await.get(username).cloned()
    }
}
