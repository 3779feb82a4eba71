//! Product domain types.

use axum::body::Bytes;
use chrono::{DateTime, Utc};

use startify_core::{Category, Price, ProductId, Username};

/// A catalog product.
///
/// Created by the product form; never edited or deleted.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    /// Username of the account that created the product.
    pub owner: Username,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    pub image: Option<ProductImage>,
    pub created_at: DateTime<Utc>,
}

/// Raw bytes of an uploaded product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    /// MIME type derived from the file extension.
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl ProductImage {
    /// Size of the image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Unvalidated product form input, exactly as submitted.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub image: Option<ImageUpload>,
}

/// A file field from the product form.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    /// File name reported by the browser (may be empty).
    pub file_name: String,
    pub bytes: Bytes,
}

/// Validated product data, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    pub image: Option<ProductImage>,
}
