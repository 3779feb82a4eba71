//! Authentication service.
//!
//! Accounts are created in two steps. The first collects a name and email and
//! returns an [`Onboarding`] record that the handler keeps in the session; the
//! second takes the password and creates the [`User`]. The username is never
//! typed at signup: it is the part of the email before the `@`.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use startify_core::{Email, Username};

use crate::db::users::UserRepository;
use crate::db::{RepositoryError, Store};
use crate::models::{Onboarding, User};

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Validate the first signup step.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if the name or email is blank.
    /// Returns `AuthError::InvalidEmail` if the email cannot be parsed.
    pub fn validate_onboarding(name: &str, email: &str) -> Result<Onboarding, AuthError> {
        let name = name.trim();
        if name.is_empty() || email.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        Ok(Onboarding {
            name: name.to_owned(),
            email: Email::parse(email)?,
        })
    }

    /// Finish signup: check the password and create the account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the password is empty or does
    /// not equal the confirmation.
    /// Returns `AuthError::UserAlreadyExists` if the derived username is taken.
    pub async fn register(
        &self,
        onboarding: &Onboarding,
        password: &SecretString,
        password_confirm: &SecretString,
    ) -> Result<User, AuthError> {
        let password = password.expose_secret();
        if password.is_empty() || password != password_confirm.expose_secret() {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = hash_password(password)?;

        let user = User {
            username: Username::from_email(&onboarding.email),
            name: onboarding.name.clone(),
            email: onboarding.email.clone(),
            password_hash,
            created_at: Utc::now(),
        };

        self.users.create(user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
        })
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password is wrong.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<User, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get(&username)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.expose_secret(), &user.password_hash)?;

        Ok(user)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s)
    }

    #[test]
    fn test_validate_onboarding_requires_both_fields() {
        assert!(matches!(
            AuthService::validate_onboarding("", "ana@example.com"),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            AuthService::validate_onboarding("Ana", "   "),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            AuthService::validate_onboarding("Ana", "ana"),
            Err(AuthError::InvalidEmail(_))
        ));

        let onboarding =
            AuthService::validate_onboarding(" Ana Souza ", "ana@example.com").unwrap();
        assert_eq!(onboarding.name, "Ana Souza");
        assert_eq!(onboarding.email.as_str(), "ana@example.com");
    }

    #[tokio::test]
    async fn test_register_derives_username_and_hashes_password() {
        let store = Store::new();
        let auth = AuthService::new(&store);
        let onboarding = AuthService::validate_onboarding("Ana", "ana@example.com").unwrap();

        let user = auth
            .register(&onboarding, &secret("s3nha"), &secret("s3nha"))
            .await
            .unwrap();

        assert_eq!(user.username.as_str(), "ana");
        assert_ne!(user.password_hash, "s3nha");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_or_mismatched_password() {
        let store = Store::new();
        let auth = AuthService::new(&store);
        let onboarding = AuthService::validate_onboarding("Ana", "ana@example.com").unwrap();

        assert!(matches!(
            auth.register(&onboarding, &secret(""), &secret("")).await,
            Err(AuthError::PasswordMismatch)
        ));
        assert!(matches!(
            auth.register(&onboarding, &secret("abc"), &secret("abd")).await,
            Err(AuthError::PasswordMismatch)
        ));
        let username = Username::parse("ana").unwrap();
        assert!(UserRepository::new(&store).get(&username).await.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let store = Store::new();
        let auth = AuthService::new(&store);

        let first = AuthService::validate_onboarding("Ana", "ana@example.com").unwrap();
        auth.register(&first, &secret("pw"), &secret("pw"))
            .await
            .unwrap();

        let second = AuthService::validate_onboarding("Other Ana", "ana@work.org").unwrap();
        assert!(matches!(
            auth.register(&second, &secret("pw"), &secret("pw")).await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_login() {
        let store = Store::new();
        let auth = AuthService::new(&store);
        let onboarding = AuthService::validate_onboarding("Ana", "ana@example.com").unwrap();
        auth.register(&onboarding, &secret("pw"), &secret("pw"))
            .await
            .unwrap();

        let user = auth.login("ana", &secret("pw")).await.unwrap();
        assert_eq!(user.name, "Ana");

        assert!(matches!(
            auth.login("ana", &secret("wrong")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", &secret("pw")).await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("ana@example.com", &secret("pw")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
