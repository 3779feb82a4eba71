//! Catalog service.
//!
//! Products live in one shared list; every read goes through the owner filter,
//! so an account only ever sees its own products.

mod error;
pub mod export;

pub use error::CatalogError;

use chrono::Utc;
use rand::Rng;

use startify_core::{Category, Price, ProductId, Username};

use crate::db::Store;
use crate::db::products::ProductRepository;
use crate::models::{ImageUpload, NewProduct, Product, ProductDraft, ProductImage};

/// How many products the dashboard lists under "Latest products".
pub const RECENT_LIMIT: usize = 5;

/// Upper bound of the simulated per-product sales.
pub const MAX_SIMULATED_SALES: u32 = 5;

/// Figures shown on the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    /// Number of products owned by the user.
    pub created: usize,
    /// Simulated number of products sold.
    pub sold: u32,
    /// The newest products, oldest first.
    pub recent: Vec<Product>,
}

/// Catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            products: ProductRepository::new(store),
        }
    }

    /// Validate raw product form input.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidFields` if the name or description is
    /// blank, the price is not a positive number, or the category is unknown.
    /// Returns `CatalogError::UnsupportedImage` or `CatalogError::ImageTooLarge`
    /// for a bad upload.
    pub fn validate(
        draft: ProductDraft,
        max_image_bytes: usize,
    ) -> Result<NewProduct, CatalogError> {
        let name = draft.name.trim();
        let description = draft.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(CatalogError::InvalidFields);
        }

        let price = Price::parse(&draft.price).map_err(|_| CatalogError::InvalidFields)?;
        let category =
            Category::from_slug(&draft.category).map_err(|_| CatalogError::InvalidFields)?;

        let image = match draft.image {
            Some(upload) => validate_image(upload, max_image_bytes)?,
            None => None,
        };

        Ok(NewProduct {
            name: name.to_owned(),
            price,
            category,
            description: description.to_owned(),
            image,
        })
    }

    /// Store a new product owned by `owner`.
    pub async fn create(&self, owner: &Username, new: NewProduct) -> Product {
        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(now),
            owner: owner.clone(),
            name: new.name,
            price: new.price,
            category: new.category,
            description: new.description,
            image: new.image,
            created_at: now,
        };

        self.products.insert(product).await
    }

    /// All products owned by `owner`, oldest first.
    pub async fn list(&self, owner: &Username) -> Vec<Product> {
        self.products.list_by_owner(owner).await
    }

    /// Dashboard figures, with sales simulated by the thread RNG.
    pub async fn dashboard(&self, owner: &Username) -> DashboardStats {
        let products = self.list(owner).await;
        summarize(products, &mut rand::rng())
    }

    /// The owner's products as CSV, or `None` if there is nothing to export.
    pub async fn export_csv(&self, owner: &Username) -> Option<String> {
        let products = self.list(owner).await;
        if products.is_empty() {
            return None;
        }
        Some(export::to_csv(&products))
    }

    /// The image of a product, if it exists, belongs to `owner`, and has one.
    pub async fn image(&self, owner: &Username, id: ProductId) -> Option<ProductImage> {
        self.products
            .get_for_owner(id, owner)
            .await
            .and_then(|p| p.image)
    }
}

/// Build dashboard figures from the owner's products.
fn summarize(products: Vec<Product>, rng: &mut impl Rng) -> DashboardStats {
    let created = products.len();
    let sold = products
        .iter()
        .map(|_| rng.random_range(0..=MAX_SIMULATED_SALES))
        .sum();
    let skip = created.saturating_sub(RECENT_LIMIT);
    let recent = products.into_iter().skip(skip).collect();

    DashboardStats {
        created,
        sold,
        recent,
    }
}

/// Check an uploaded file. An upload without bytes means no image was chosen.
fn validate_image(
    upload: ImageUpload,
    max_image_bytes: usize,
) -> Result<Option<ProductImage>, CatalogError> {
    if upload.bytes.is_empty() {
        return Ok(None);
    }

    let content_type = image_content_type(&upload.file_name)
        .ok_or_else(|| CatalogError::UnsupportedImage(upload.file_name.clone()))?;

    if upload.bytes.len() > max_image_bytes {
        return Err(CatalogError::ImageTooLarge {
            max: max_image_bytes,
        });
    }

    Ok(Some(ProductImage {
        content_type,
        bytes: upload.bytes,
    }))
}

/// MIME type for the accepted image extensions (`jpg`, `jpeg`, `png`).
fn image_content_type(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}
