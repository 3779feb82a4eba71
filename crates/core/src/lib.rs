//! Startify Core - Shared domain types.
//!
//! This crate provides the value types used by the Startify web application:
//! validated emails and usernames, product IDs, prices, and product categories.
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no HTTP,
//! no storage. Form input is turned into these types at the edge of the web
//! crate, so everything past the handlers works with validated values.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, usernames, IDs, prices, and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
