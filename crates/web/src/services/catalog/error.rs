//! Catalog error types.

use thiserror::Error;

/// Errors that can occur when validating a product form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Name or description blank, price not a positive number, or unknown category.
    #[error("product fields are missing or invalid")]
    InvalidFields,

    /// The uploaded file is not a JPG or PNG.
    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),

    /// The uploaded file exceeds the configured limit.
    #[error("image is larger than {max} bytes")]
    ImageTooLarge {
        /// Maximum allowed size in bytes.
        max: usize,
    },
}
