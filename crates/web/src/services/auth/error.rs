//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during signup and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Name or email left empty on the first signup step.
    #[error("name and email are required")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] startify_core::EmailError),

    /// Password empty or different from its confirmation.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// An account with the derived username already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Unknown username or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
