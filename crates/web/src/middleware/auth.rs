//! Authentication extractors and session helpers.
//!
//! `RequireAuth` is the login gate: any handler that takes it is only reached
//! when the session holds a current user.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, Onboarding, session_keys};

/// Where unauthenticated visitors are sent.
pub const LOGIN_REQUIRED_URL: &str = "/auth/login?error=login_required";

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, redirects to the login page, which shows a
/// "sign in to continue" warning.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is logged in.
pub enum AuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// The session layer is missing from the router.
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_REQUIRED_URL).into_response(),
            Self::MissingSession => {
                tracing::error!("Session not found in request extensions");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::MissingSession)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in. Used by pages whose menu depends on the login state.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

/// Helper to stage signup data between the two signup steps.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_onboarding(
    session: &Session,
    onboarding: &Onboarding,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ONBOARDING, onboarding).await
}

/// Helper to read the staged signup data, if any.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn get_onboarding(
    session: &Session,
) -> Result<Option<Onboarding>, tower_sessions::session::Error> {
    session.get(session_keys::ONBOARDING).await
}

/// Helper to remove and return the staged signup data.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_onboarding(
    session: &Session,
) -> Result<Option<Onboarding>, tower_sessions::session::Error> {
    session.remove(session_keys::ONBOARDING).await
}
