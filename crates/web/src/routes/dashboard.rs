//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::routes::flash::{MessageQuery, Page};
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// One line of the "Latest products" list.
pub struct RecentProduct {
    pub name: String,
    pub price: String,
    pub category: &'static str,
}

impl From<&Product> for RecentProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.label(),
        }
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub page: Page,
    pub name: String,
    pub created: usize,
    pub sold: u32,
    pub recent: Vec<RecentProduct>,
}

/// Display the dashboard with the signed-in user's figures.
#[instrument(skip_all, fields(username = %user.username))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    let stats = CatalogService::new(state.store())
        .dashboard(&user.username)
        .await;

    DashboardTemplate {
        name: user.name.clone(),
        created: stats.created,
        sold: stats.sold,
        recent: stats.recent.iter().map(RecentProduct::from).collect(),
        page: Page::new(Some(user), "dashboard", &query),
    }
}
