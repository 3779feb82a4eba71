//! Session-related types.
//!
//! Types stored in the session for authentication and signup state.

use serde::{Deserialize, Serialize};

use startify_core::{Email, Username};

use super::User;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The account's username.
    pub username: Username,
    /// Display name, used for greetings.
    pub name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

/// Staging record between the two signup steps.
///
/// Written when the name/email step succeeds and removed once the account
/// is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Onboarding {
    pub name: String,
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the signup staging record.
    pub const ONBOARDING: &str = "onboarding";
}
