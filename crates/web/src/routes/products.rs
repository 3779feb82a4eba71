//! Product route handlers.
//!
//! Every handler here sits behind `RequireAuth` and only ever sees the
//! signed-in user's products.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{
        Path, Query, State,
        multipart::{Multipart, MultipartError},
    },
    http::{
        StatusCode,
        header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use startify_core::{Category, ProductId};

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{ImageUpload, Product, ProductDraft};
use crate::routes::flash::{MessageQuery, Page, success_url};
use crate::services::catalog::{CatalogError, CatalogService};
use crate::state::AppState;

/// Download name of the CSV export.
pub const EXPORT_FILE_NAME: &str = "my_products.csv";

// =============================================================================
// View Types
// =============================================================================

/// Product display data for templates.
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub category: &'static str,
    pub description: String,
    pub created_at: String,
    pub has_image: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.label(),
            description: product.description.clone(),
            created_at: product.created_at.format("%Y-%m-%d %H:%M").to_string(),
            has_image: product.image.is_some(),
        }
    }
}

/// Category option for the create form.
pub struct CategoryOption {
    pub slug: &'static str,
    pub label: &'static str,
}

// =============================================================================
// Templates
// =============================================================================

/// My products page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub page: Page,
    pub products: Vec<ProductRow>,
}

/// Create-product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub page: Page,
    pub categories: Vec<CategoryOption>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the signed-in user's products.
#[instrument(skip_all, fields(username = %user.username))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let products = CatalogService::new(state.store())
        .list(&user.username)
        .await;

    ProductsIndexTemplate {
        products: products.iter().map(ProductRow::from).collect(),
        page: Page::new(Some(user), "products", &query),
    }
}

/// Display the create-product form.
pub async fn new_page(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let categories = Category::ALL
        .iter()
        .map(|c| CategoryOption {
            slug: c.slug(),
            label: c.label(),
        })
        .collect();

    NewProductTemplate {
        page: Page::new(Some(user), "new_product", &query),
        categories,
    }
}

/// Handle the multipart create-product form.
#[instrument(skip_all, fields(username = %user.username))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let draft = match read_draft(&mut multipart).await {
        Ok(draft) => draft,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::info!("Product form exceeded the body limit");
            return Ok(Redirect::to("/products/new?error=image_too_large").into_response());
        }
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };

    let new = match CatalogService::validate(draft, state.config().max_image_bytes) {
        Ok(new) => new,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected product form");
            let code = match e {
                CatalogError::InvalidFields => "invalid_product",
                CatalogError::UnsupportedImage(_) => "unsupported_image",
                CatalogError::ImageTooLarge { .. } => "image_too_large",
            };
            return Ok(Redirect::to(&format!("/products/new?error={code}")).into_response());
        }
    };

    let product = CatalogService::new(state.store())
        .create(&user.username, new)
        .await;

    add_breadcrumb("catalog", "Product created", &[("name", product.name.as_str())]);
    tracing::info!(product_id = %product.id, "Product created");

    Ok(Redirect::to(&success_url("/products/new", "product_created", &product.name)).into_response())
}

/// Download the signed-in user's products as CSV.
///
/// With nothing to export, goes back to the (empty) product list.
#[instrument(skip_all, fields(username = %user.username))]
pub async fn export_csv(State(state): State<AppState>, RequireAuth(user): RequireAuth) -> Response {
    match CatalogService::new(state.store())
        .export_csv(&user.username)
        .await
    {
        Some(csv) => (
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            csv,
        )
            .into_response(),
        None => Redirect::to("/products").into_response(),
    }
}

/// Serve a product image to its owner.
pub async fn image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let image = CatalogService::new(state.store())
        .image(&user.username, ProductId::new(id))
        .await
        .ok_or_else(|| AppError::NotFound(format!("image for product {id}")))?;

    Ok((
        [
            (CONTENT_TYPE, image.content_type),
            (CACHE_CONTROL, "private, max-age=3600"),
        ],
        image.bytes,
    )
        .into_response())
}

// =============================================================================
// Helpers
// =============================================================================

/// Collect the product form fields. Unknown fields are skipped.
async fn read_draft(multipart: &mut Multipart) -> Result<ProductDraft, MultipartError> {
    let mut draft = ProductDraft::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => draft.name = field.text().await?,
            "price" => draft.price = field.text().await?,
            "category" => draft.category = field.text().await?,
            "description" => draft.description = field.text().await?,
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                draft.image = Some(ImageUpload { file_name, bytes });
            }
            _ => {}
        }
    }

    Ok(draft)
}
