//! HTTP route handlers for Startify.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Account
//! GET  /account/new            - Signup page (details or password step)
//! POST /account/new            - Signup details step
//! POST /account/new/finish     - Signup password step
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action (requires auth)
//!
//! # Dashboard (requires auth)
//! GET  /dashboard              - Figures and latest products
//!
//! # Products (requires auth)
//! GET  /products               - My products
//! POST /products               - Create product (multipart)
//! GET  /products/new           - Create-product form
//! GET  /products/export.csv    - CSV download
//! GET  /products/{id}/image    - Product image
//!
//! GET  /static/*               - Stylesheet
//! ```

pub mod account;
pub mod auth;
pub mod dashboard;
pub mod flash;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    create_session_layer, make_request_span, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/new",
            get(account::signup_page).post(account::submit_details),
        )
        .route("/new/finish", post(account::finish))
}

/// Create the product routes router.
///
/// `upload_limit` caps the multipart body of the create form.
pub fn product_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::index)
                .post(products::create)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/new", get(products::new_page))
        .route("/export.csv", get(products::export_csv))
        .route("/{id}/image", get(products::image))
}

/// Create all page routes.
pub fn routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/dashboard", get(dashboard::index))
        .nest("/account", account_routes())
        .nest("/auth", auth_routes())
        .nest("/products", product_routes(upload_limit))
}

/// Build the full application router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn router(state: AppState) -> Router {
    let config = state.config();
    let session_layer = create_session_layer(config);
    let static_dir = ServeDir::new(&config.static_dir);
    let upload_limit = config.upload_body_limit();

    Router::new()
        .route("/health", get(health))
        .merge(routes(upload_limit))
        .nest_service("/static", static_dir)
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
