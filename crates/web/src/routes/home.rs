//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::flash::{MessageQuery, Page};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: Page,
}

/// Display the home page.
pub async fn home(
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    HomeTemplate {
        page: Page::new(viewer, "home", &query),
    }
}
