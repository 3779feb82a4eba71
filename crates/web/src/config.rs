//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STARTIFY_HOST` - Bind address (default: 127.0.0.1)
//! - `STARTIFY_PORT` - Listen port (default: 3000)
//! - `STARTIFY_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: <http://localhost:3000>)
//! - `STARTIFY_MAX_IMAGE_BYTES` - Largest accepted product image (default: 5 MiB)
//! - `STARTIFY_STATIC_DIR` - Directory served under `/static`
//!   (default: crates/web/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Startify application configuration.
///
/// Implements `Debug` manually to redact the Sentry DSN.
#[derive(Clone)]
pub struct StartifyConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Largest accepted product image, in bytes
    pub max_image_bytes: usize,
    /// Directory with the stylesheet
    pub static_dir: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for StartifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartifyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("max_image_bytes", &self.max_image_bytes)
            .field("static_dir", &self.static_dir)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl Default for StartifyConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: format!("http://localhost:{DEFAULT_PORT}"),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            static_dir: "crates/web/static".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StartifyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        Ok(Self {
            host: get_parsed_env("STARTIFY_HOST", defaults.host)?,
            port: get_parsed_env("STARTIFY_PORT", defaults.port)?,
            base_url: get_optional_env("STARTIFY_BASE_URL").unwrap_or(defaults.base_url),
            max_image_bytes: get_parsed_env("STARTIFY_MAX_IMAGE_BYTES", defaults.max_image_bytes)?,
            static_dir: get_optional_env("STARTIFY_STATIC_DIR").unwrap_or(defaults.static_dir),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Request body limit for the product form: the image plus room for the
    /// text fields and multipart framing.
    #[must_use]
    pub const fn upload_body_limit(&self) -> usize {
        self.max_image_bytes.saturating_add(64 * 1024)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable parsed into `T`, or `default` if unset.
fn get_parsed_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StartifyConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
        assert!(config.upload_body_limit() > config.max_image_bytes);
    }

    #[test]
    fn test_parse_value() {
        let port: u16 = parse_value("STARTIFY_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);

        let err = parse_value::<u16>("STARTIFY_PORT", "eighty").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STARTIFY_PORT"));

        let host: IpAddr = parse_value("STARTIFY_HOST", "0.0.0.0").unwrap();
        assert!(host.is_unspecified());
    }

    #[test]
    fn test_debug_redacts_sentry_dsn() {
        let config = StartifyConfig {
            sentry_dsn: Some("https://key@o0.ingest.sentry.io/1".to_string()),
            ..StartifyConfig::default()
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("ingest.sentry.io"));
    }
}
