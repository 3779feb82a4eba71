//! Domain models for Startify.
//!
//! - [`user`] - Accounts held in the in-memory store
//! - [`product`] - Catalog products and the raw form input they are built from
//! - [`session`] - Data kept in the browser session (login state, signup staging)

pub mod product;
pub mod session;
pub mod user;

pub use product::{ImageUpload, NewProduct, Product, ProductDraft, ProductImage};
pub use session::{CurrentUser, Onboarding, keys as session_keys};
pub use user::User;
