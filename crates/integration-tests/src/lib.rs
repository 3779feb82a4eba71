//! Integration tests for Startify.
//!
//! The tests drive the full router in process, session layer and middleware
//! included, so no server or external service has to be running.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p startify-integration-tests
//! ```
//!
//! [`TestClient`] plays the browser: it keeps the session cookie between
//! requests and does not follow redirects, so tests can assert on them.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{
        HeaderMap, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use tower::ServiceExt;

use startify_web::config::StartifyConfig;
use startify_web::routes;
use startify_web::state::AppState;

/// Boundary used for multipart bodies built by [`TestClient::post_multipart`].
pub const BOUNDARY: &str = "startify-test-boundary";

/// A part of a multipart form.
pub enum Part<'a> {
    /// Plain text field.
    Text(&'a str, &'a str),
    /// File field.
    File {
        name: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
}

/// Response captured for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Body decoded as UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// A response header as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// In-process browser with its own cookie jar.
///
/// Clients created with [`TestClient::sibling`] share the application (and so
/// its accounts and products) but not the session.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Client for a fresh application with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StartifyConfig::default())
    }

    /// Client for a fresh application with the given configuration.
    #[must_use]
    pub fn with_config(config: StartifyConfig) -> Self {
        Self {
            router: routes::router(AppState::new(config)),
            cookie: None,
        }
    }

    /// Another browser against the same application.
    #[must_use]
    pub fn sibling(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Send a request, carrying and updating the session cookie.
    pub async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = pair
                .split_once('=')
                .filter(|(_, value)| !value.is_empty())
                .map(|_| pair.to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// GET a path.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// POST an url-encoded form. `body` must already be encoded.
    pub async fn post_form(&mut self, uri: &str, body: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send(request).await
    }

    /// POST a multipart form.
    pub async fn post_multipart(&mut self, uri: &str, parts: &[Part<'_>]) -> TestResponse {
        let request = Request::post(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    /// Run both signup steps. `email` must be url-encoded.
    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> TestResponse {
        let details = self
            .post_form("/account/new", &format!("name={name}&email={email}"))
            .await;
        assert_eq!(
            details.location(),
            Some("/account/new?success=details_saved")
        );

        self.post_form(
            "/account/new/finish",
            &format!("password={password}&password_confirm={password}"),
        )
        .await
    }

    /// Submit the login form.
    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form(
            "/auth/login",
            &format!("username={username}&password={password}"),
        )
        .await
    }

    /// Submit the create-product form with a text-only product.
    pub async fn create_product(&mut self, name: &str, price: &str) -> TestResponse {
        self.post_multipart(
            "/products",
            &[
                Part::Text("name", name),
                Part::Text("price", price),
                Part::Text("category", "ebook"),
                Part::Text("description", "A short guide"),
                Part::File {
                    name: "image",
                    file_name: "",
                    bytes: b"",
                },
            ],
        )
        .await
    }
}

/// Encode parts as `multipart/form-data` with [`BOUNDARY`].
#[must_use]
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
