//! Authentication route handlers.
//!
//! Handles login and logout against the in-memory account store.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::flash::{MessageQuery, Page, success_url};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: Page,
}

/// Display the login page.
pub async fn login_page(
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        page: Page::new(viewer, "login", &query),
    }
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let password = SecretString::from(form.password);

    let user = match AuthService::new(state.store())
        .login(&form.username, &password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            return Redirect::to("/auth/login?error=credentials").into_response();
        }
    };

    if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/auth/login?error=session").into_response();
    }

    set_sentry_user(&user.username);
    add_breadcrumb("auth", "Signed in", &[("username", user.username.as_str())]);
    tracing::info!(username = %user.username, "Signed in");

    Redirect::to(&success_url("/dashboard", "signed_in", &user.name)).into_response()
}

/// Handle logout.
///
/// Clears the current user and destroys the session.
pub async fn logout(RequireAuth(user): RequireAuth, session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    clear_sentry_user();
    tracing::info!(username = %user.username, "Signed out");

    Redirect::to("/?success=signed_out").into_response()
}
