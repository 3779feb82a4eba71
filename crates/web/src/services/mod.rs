//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Two-step signup and username/password login
//! - `catalog` - Product validation, creation, listing, dashboard stats, CSV export
//!
//! Services borrow the [`Store`](crate::db::Store) for the duration of a
//! request and are cheap to construct per handler call.

pub mod auth;
pub mod catalog;
