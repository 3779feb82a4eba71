//! Session middleware configuration.
//!
//! Sessions are kept in process memory by tower-sessions' `MemoryStore`, so
//! they disappear on restart along with the rest of the data.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StartifyConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "startify_session";

/// Session expiry after inactivity, in hours.
const SESSION_EXPIRY_HOURS: i64 = 24;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StartifyConfig) -> SessionManagerLayer<MemoryStore> {
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::hours(SESSION_EXPIRY_HOURS)))
        .with_secure(is_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, http::header, routing::get};
    use tower::ServiceExt;
    use tower_sessions::Session;

    use super::*;

    async fn touch(session: Session) -> &'static str {
        session.insert("visits", 1_u32).await.unwrap();
        "ok"
    }

    async fn set_cookie_for(base_url: &str) -> String {
        let config = StartifyConfig {
            base_url: base_url.to_string(),
            ..StartifyConfig::default()
        };
        let app = Router::new()
            .route("/", get(touch))
            .layer(create_session_layer(&config));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn test_cookie_flags_over_http() {
        let cookie = set_cookie_for("http://localhost:3000").await;

        assert!(cookie.starts_with("startify_session="));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_cookie_is_secure_over_https() {
        let cookie = set_cookie_for("https://startify.example").await;

        assert!(cookie.starts_with("startify_session="));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
    }
}
