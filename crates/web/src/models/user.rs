//! User domain types.

use chrono::{DateTime, Utc};

use startify_core::{Email, Username};

/// A registered account.
///
/// Created at signup and never updated or deleted while the process runs.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique key, derived from the email's local part.
    pub username: Username,
    /// Full name entered during onboarding.
    pub name: String,
    /// Email entered during onboarding.
    pub email: Email,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
