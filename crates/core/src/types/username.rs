//! Account username type.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::Email;

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is empty or only whitespace.
    #[error("username cannot be empty")]
    Empty,
    /// The input contains an @ symbol (the full email was entered).
    #[error("username is the part of the email before the @")]
    ContainsAtSymbol,
}

/// The unique key of an account.
///
/// A username is never chosen directly: it is the local part of the email the
/// account was created with. On the login form users type it back in, so
/// [`Username::parse`] accepts the same shape.
///
/// ```
/// use startify_core::{Email, Username};
///
/// let email = Email::parse("ana@example.com").unwrap();
/// assert_eq!(Username::from_email(&email).as_str(), "ana");
/// assert_eq!(Username::parse(" ana ").unwrap().as_str(), "ana");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Derive the username of an account from its email.
    #[must_use]
    pub fn from_email(email: &Email) -> Self {
        Self(email.local_part().to_owned())
    }

    /// Parse a username typed on the login form.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or contains `@`.
    pub fn parse(input: &str) -> Result<Self, UsernameError> {
        let s = input.trim();

        if s.is_empty() {
            return Err(UsernameError::Empty);
        }

        if s.contains('@') {
            return Err(UsernameError::ContainsAtSymbol);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
