//! In-memory storage for Startify.
//!
//! All data lives in process memory and is lost on restart:
//!
//! - `users` - Accounts keyed by username
//! - `products` - One flat list shared by every account, in insertion order;
//!   reads filter it by owner
//!
//! Sessions are kept separately by the tower-sessions memory store
//! (see [`crate::middleware::session`]).

pub mod products;
pub mod users;

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::RwLock;

use startify_core::Username;

use crate::models::{Product, User};

/// Errors returned by the repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Unique key violation (e.g., username already taken).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Process-wide data store.
///
/// Shared through [`crate::state::AppState`]; access goes through
/// [`users::UserRepository`] and [`products::ProductRepository`].
#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<HashMap<Username, User>>,
    products: RwLock<Vec<Product>>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
