//! Core types for Startify.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod username;

pub use category::{Category, CategoryError};
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{Price, PriceError};
pub use username::{Username, UsernameError};
