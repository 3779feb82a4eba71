//! Account creation route handlers.
//!
//! Signup takes two steps on the same page. The first posts a name and email;
//! once they are staged in the session the page also shows the password form,
//! whose submission creates the account and signs the user in. The details
//! form stays on the page, prefilled, and resubmitting it replaces the staged
//! record.

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

use crate::error::{AppError, add_breadcrumb, set_sentry_user};
use crate::filters;
use crate::middleware::{
    OptionalAuth, get_onboarding, set_current_user, set_onboarding, take_onboarding,
};
use crate::models::{CurrentUser, Onboarding};
use crate::routes::flash::{MessageQuery, Page, success_url};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// First signup step.
#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Second signup step.
#[derive(Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
///
/// Always renders the details form; adds the password form once `onboarding`
/// is set.
#[derive(Template, WebTemplate)]
#[template(path = "account/signup.html")]
pub struct SignupTemplate {
    pub page: Page,
    pub onboarding: Option<Onboarding>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the signup page for the current step.
pub async fn signup_page(
    OptionalAuth(viewer): OptionalAuth,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let onboarding = get_onboarding(&session).await?;

    Ok(SignupTemplate {
        page: Page::new(viewer, "signup", &query),
        onboarding,
    })
}

/// Handle the name/email step.
#[instrument(skip_all)]
pub async fn submit_details(session: Session, Form(form): Form<DetailsForm>) -> Response {
    let onboarding = match AuthService::validate_onboarding(&form.name, &form.email) {
        Ok(onboarding) => onboarding,
        Err(AuthError::InvalidEmail(e)) => {
            tracing::debug!(error = %e, "Rejected signup email");
            return Redirect::to("/account/new?error=invalid_email").into_response();
        }
        Err(_) => return Redirect::to("/account/new?error=missing_fields").into_response(),
    };

    if let Err(e) = set_onboarding(&session, &onboarding).await {
        tracing::error!("Failed to stage signup: {}", e);
        return Redirect::to("/account/new?error=session").into_response();
    }

    Redirect::to("/account/new?success=details_saved").into_response()
}

/// Handle the password step: create the account and sign in.
#[instrument(skip_all)]
pub async fn finish(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    let Some(onboarding) = get_onboarding(&session).await? else {
        return Ok(Redirect::to("/account/new").into_response());
    };

    let password = SecretString::from(form.password);
    let password_confirm = SecretString::from(form.password_confirm);

    let user = match AuthService::new(state.store())
        .register(&onboarding, &password, &password_confirm)
        .await
    {
        Ok(user) => user,
        Err(AuthError::PasswordMismatch) => {
            return Ok(Redirect::to("/account/new?error=password_mismatch").into_response());
        }
        Err(AuthError::UserAlreadyExists) => {
            tracing::info!(email = %onboarding.email, "Signup for taken username");
            // Back to the details step so a different email can be entered
            take_onboarding(&session).await?;
            return Ok(Redirect::to("/account/new?error=user_exists").into_response());
        }
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    take_onboarding(&session).await?;
    set_current_user(&session, &CurrentUser::from(&user)).await?;

    set_sentry_user(&user.username);
    add_breadcrumb("auth", "Account created", &[("username", user.username.as_str())]);
    tracing::info!(username = %user.username, "Account created");

    Ok(Redirect::to(&success_url("/dashboard", "account_created", &user.name)).into_response())
}
